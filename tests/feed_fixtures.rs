//! End-to-end decoding of realistic feeds through the public API.

use mediarss_rs::context::{CancelHandle, ParseContext, Step};
use mediarss_rs::events::{Token, XmlTokenizer};
use mediarss_rs::objects::{Channel, MediaCredit, Size};
use mediarss_rs::{parse, parse_cancellable, parse_str, writer, Error};
use pretty_assertions::assert_eq;
use std::io::Cursor;

const GALLERY_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"
     xmlns:m="http://search.yahoo.com/mrss/"
     xmlns:content="http://purl.org/rss/1.0/modules/content/"
     xmlns:dc="http://purl.org/dc/elements/1.1/"
     xmlns:wfw="http://wellformedweb.org/CommentAPI/"
     xmlns:slash="http://purl.org/rss/1.0/modules/slash/">
  <channel>
    <title>City Gallery</title>
    <link>http://gallery.example.com/</link>
    <description>Photos &amp; clips from around town</description>
    <language>en-us</language>
    <copyright>2024 City Gallery</copyright>
    <managingEditor>editor@example.com</managingEditor>
    <webMaster>web@example.com</webMaster>
    <pubDate>Sat, 07 Sep 2002 00:00:01 GMT</pubDate>
    <lastBuildDate>yesterday</lastBuildDate>
    <generator>hand</generator>
    <docs>http://blogs.law.harvard.edu/tech/rss</docs>
    <ttl>60</ttl>
    <image>
      <title>Gallery logo</title>
      <url>http://gallery.example.com/logo.png</url>
      <link>http://gallery.example.com/</link>
    </image>
    <item>
      <title>Draft title</title>
      <title>Harbour at dawn</title>
      <link>http://gallery.example.com/harbour</link>
      <description>Boats in the &lt;b&gt;harbour&lt;/b&gt; http://gallery.example.com/harbour.jpg</description>
      <content:encoded><![CDATA[<p><img src="http://gallery.example.com/harbour_big.png"></p>]]></content:encoded>
      <dc:creator>Jane Doe</dc:creator>
      <comments>http://gallery.example.com/harbour#comments</comments>
      <wfw:commentRss>http://gallery.example.com/harbour/feed</wfw:commentRss>
      <slash:comments>14</slash:comments>
      <guid isPermaLink="false">harbour-2024</guid>
      <pubDate>Tue, 10 Jun 2003 04:00:00 +0200</pubDate>
      <m:group>
        <m:title>Harbour</m:title>
        <m:content url="http://gallery.example.com/harbour.jpg" fileSize="204800"
                   type="image/jpeg" medium="image" isDefault="TRUE"
                   width="1024" height="768" lang="en"/>
        <m:content url="http://gallery.example.com/harbour.mp4" fileSize="9000000"
                   type="video/mp4" medium="video" isDefault="yes" expression="sample"
                   bitrate="128" framerate="25" samplingrate="48" channels="2"
                   duration="185" width="640"/>
      </m:group>
      <m:thumbnail url="http://gallery.example.com/harbour_t.jpg" width="75" height="50"
                   time="12:05:01.123"/>
      <m:credit role="photographer"> Jane Doe </m:credit>
      <m:credit>City Gallery</m:credit>
    </item>
    <item>
      <title>Untitled clip</title>
      <link>not a url</link>
      <slash:comments>many</slash:comments>
      <pubDate>not a date</pubDate>
      <m:content url="http://gallery.example.com/clip.mov" isDefault="false"/>
    </item>
    <item/>
  </channel>
  <channel>
    <title>Second channel</title>
    <item><title>Ignored</title></item>
  </channel>
</rss>"#;

fn gallery() -> Channel {
    parse(Cursor::new(GALLERY_FEED)).unwrap()
}

#[test]
fn test_channel_metadata() {
    let channel = gallery();

    assert_eq!(channel.title, "City Gallery");
    assert_eq!(
        channel.link.as_ref().map(|u| u.as_str()),
        Some("http://gallery.example.com/")
    );
    assert_eq!(channel.description, "Photos & clips from around town");
    assert_eq!(channel.language.as_deref(), Some("en-us"));
    assert_eq!(channel.copyright.as_deref(), Some("2024 City Gallery"));
    assert_eq!(channel.managing_editor_email.as_deref(), Some("editor@example.com"));
    assert_eq!(channel.web_master_email.as_deref(), Some("web@example.com"));
    assert_eq!(channel.generator.as_deref(), Some("hand"));
    assert!(channel.docs_url.is_some());
    assert_eq!(channel.ttl, 60);

    let pub_date = channel.pub_date.unwrap();
    assert_eq!(pub_date.to_rfc3339(), "2002-09-07T00:00:01+00:00");
    assert!(channel.last_build_date.is_none());
}

#[test]
fn test_items_in_document_order() {
    let channel = gallery();

    // Items of the second channel are never decoded
    assert_eq!(channel.item_count(), 3);
    let titles: Vec<_> = channel.iter_items().map(|i| i.title.as_deref()).collect();
    assert_eq!(titles, vec![Some("Harbour at dawn"), Some("Untitled clip"), None]);
}

#[test]
fn test_item_fields() {
    let channel = gallery();
    let item = &channel.items[0];

    assert_eq!(
        item.link.as_ref().map(|u| u.as_str()),
        Some("http://gallery.example.com/harbour")
    );
    assert_eq!(
        item.item_description.as_deref(),
        Some("Boats in the <b>harbour</b> http://gallery.example.com/harbour.jpg")
    );
    assert_eq!(
        item.content.as_deref(),
        Some(r#"<p><img src="http://gallery.example.com/harbour_big.png"></p>"#)
    );
    assert_eq!(item.author.as_deref(), Some("Jane Doe"));
    assert!(item.comments_link.is_some());
    assert_eq!(
        item.comments_feed.as_ref().map(|u| u.as_str()),
        Some("http://gallery.example.com/harbour/feed")
    );
    assert_eq!(item.comments_count, 14);
    assert_eq!(item.guid.as_deref(), Some("harbour-2024"));
    assert_eq!(
        item.pub_date.unwrap().to_rfc3339(),
        "2003-06-10T04:00:00+02:00"
    );
    assert_eq!(item.media_title.as_deref(), Some("Harbour"));
}

#[test]
fn test_media_content_attributes() {
    let channel = gallery();
    let contents = &channel.items[0].media_contents;
    assert_eq!(contents.len(), 2);

    let image = &contents[0];
    assert_eq!(
        image.url.as_ref().map(|u| u.as_str()),
        Some("http://gallery.example.com/harbour.jpg")
    );
    assert_eq!(image.file_size, 204800);
    assert_eq!(image.mime_type.as_deref(), Some("image/jpeg"));
    assert!(image.is_image());
    assert!(image.is_default);
    assert_eq!(image.expression, "full");
    assert_eq!(image.size, Size::new(1024.0, 768.0));
    assert_eq!(image.language.as_deref(), Some("en"));

    let video = &contents[1];
    assert!(!video.is_default);
    assert_eq!(video.expression, "sample");
    assert_eq!(video.bitrate, 128);
    assert_eq!(video.framerate, 25);
    assert_eq!(video.sampling_rate, 48.0);
    assert_eq!(video.channels, 2);
    assert_eq!(video.duration, 185);
    assert_eq!(video.size, Size::new(640.0, 0.0));

    assert_eq!(
        channel.items[0].default_media_content().map(|c| c.file_size),
        Some(204800)
    );
}

#[test]
fn test_thumbnails_and_credits() {
    let channel = gallery();
    let item = &channel.items[0];

    assert_eq!(item.media_thumbnails.len(), 1);
    let thumbnail = &item.media_thumbnails[0];
    assert_eq!(thumbnail.size, Size::new(75.0, 50.0));
    assert_eq!(thumbnail.time_offset.as_deref(), Some("12:05:01.123"));

    assert_eq!(
        item.media_credits,
        vec![
            MediaCredit::new(Some("photographer".to_string()), "Jane Doe"),
            MediaCredit::new(None, "City Gallery"),
        ]
    );
}

#[test]
fn test_permissive_values() {
    let channel = gallery();
    let item = &channel.items[1];

    assert!(item.link.is_none());
    assert_eq!(item.comments_count, 0);
    assert!(item.pub_date.is_none());
    assert!(!item.media_contents[0].is_default);
    assert_eq!(item.media_contents[0].expression, "full");

    let empty = &channel.items[2];
    assert!(empty.title.is_none());
    assert!(!empty.has_media());
}

#[test]
fn test_image_extraction_from_fields() {
    let channel = gallery();
    let item = &channel.items[0];

    assert_eq!(
        item.images_from_item_description(),
        vec!["http://gallery.example.com/harbour.jpg"]
    );
    assert_eq!(
        item.images_from_content(),
        vec![r#"http://gallery.example.com/harbour_big.png"></p>"#]
    );
    assert!(item.images_from_media_text().is_empty());
}

#[test]
fn test_latin1_feed() {
    let xml: &[u8] = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\
<rss version=\"2.0\" xmlns:media=\"http://search.yahoo.com/mrss/\"><channel>\
<title>Caf\xE9 du Port</title>\
<item><title>Cr\xE8me br\xFBl\xE9e</title>\
<media:credit role=\"r\xE9alisateur\">Ren\xE9</media:credit></item>\
</channel></rss>";
    let channel = parse(xml).unwrap();

    assert_eq!(channel.title, "Caf\u{e9} du Port");
    let item = &channel.items[0];
    assert_eq!(item.title.as_deref(), Some("Cr\u{e8}me br\u{fb}l\u{e9}e"));
    assert_eq!(
        item.media_credits,
        vec![MediaCredit::new(Some("r\u{e9}alisateur".to_string()), "Ren\u{e9}")]
    );
}

#[test]
fn test_error_before_channel_end() {
    let truncated = &GALLERY_FEED[..GALLERY_FEED.find("</channel>").unwrap()];
    let err = parse_str(truncated).unwrap_err();
    assert!(matches!(err, Error::Tokenizer(_)));

    let mismatched = "<rss><channel><item><title>x</item></channel></rss>";
    let err = parse_str(mismatched).unwrap_err();
    assert!(err.position().is_some());
}

#[test]
fn test_document_without_channel() {
    let err = parse_str("<rss version=\"2.0\"><item><title>x</title></item></rss>").unwrap_err();
    assert!(matches!(err, Error::EmptyDocument));
}

#[test]
fn test_cancel_mid_decode() {
    let cancel = CancelHandle::new();
    let trigger = cancel.clone();

    let tokens = XmlTokenizer::from_reader(GALLERY_FEED.as_bytes())
        .enumerate()
        .map(move |(index, token)| {
            if index == 20 {
                trigger.cancel();
            }
            token
        });

    let result = ParseContext::with_cancel_handle(cancel.clone()).decode(tokens);
    assert!(result.is_none());
    assert!(cancel.is_cancelled());
}

#[test]
fn test_cancel_before_decode() {
    let cancel = CancelHandle::new();
    cancel.cancel();
    assert!(parse_cancellable(GALLERY_FEED.as_bytes(), &cancel).is_none());
}

#[test]
fn test_cancel_after_completion_is_noop() {
    let mut context = ParseContext::new();
    let cancel = context.cancel_handle();

    let mut finished = None;
    for token in XmlTokenizer::from_reader("<rss><channel><title>Done</title></channel></rss>".as_bytes()) {
        if let Step::Finished(result) = context.handle(token) {
            finished = Some(result);
            break;
        }
    }
    cancel.cancel();

    let channel = finished.unwrap().unwrap();
    assert_eq!(channel.title, "Done");
    assert!(matches!(context.handle(Token::EndDocument), Step::Continue));
}

#[test]
fn test_rewrite_round_trip() {
    let original = gallery();
    let xml = writer::to_string(&original).unwrap();
    assert_eq!(parse_str(&xml).unwrap(), original);
}

#[cfg(feature = "serde")]
#[test]
fn test_serde_round_trip() {
    let original = gallery();
    let json = serde_json::to_string(&original).unwrap();
    let restored: Channel = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, original);
}
