//! Post body composition: markdown article, image gallery, attribution

use pulldown_cmark::{Options, Parser, html};
use pulldown_cmark_escape::{FmtWriter, escape_href, escape_html};

use super::wordpress::UploadedImage;

// Writes into a String cannot fail, so the fmt::Result is dropped.
fn html_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let _ = escape_html(FmtWriter(&mut out), s);
    out
}

fn html_href(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    let _ = escape_href(FmtWriter(&mut out), url);
    out
}

pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Gutenberg gallery block for inline images, `None` when there are none
pub fn gallery_block(images: &[UploadedImage]) -> Option<String> {
    if images.is_empty() {
        return None;
    }

    let mut block = String::from(
        "<!-- wp:gallery {\"linkTo\":\"none\"} -->\n\
         <figure class=\"wp-block-gallery has-nested-images columns-default is-cropped\">\n",
    );

    for image in images {
        block.push_str(&format!(
            "<!-- wp:image {{\"id\":{id}}} -->\n\
             <figure class=\"wp-block-image\"><img src=\"{src}\" alt=\"\" class=\"wp-image-{id}\"/></figure>\n\
             <!-- /wp:image -->\n",
            id = image.media_id,
            src = html_href(&image.url),
        ));
    }

    block.push_str("</figure>\n<!-- /wp:gallery -->\n");
    Some(block)
}

/// Closing paragraph crediting the source tweet
pub fn attribution(username: &str, source_url: &str) -> String {
    format!(
        "<p class=\"tweet-source\"><em>Source: <a href=\"{}\" target=\"_blank\" rel=\"noopener\">@{} on X</a></em></p>\n",
        html_href(source_url),
        html_text(username),
    )
}

/// Full HTML body of the WordPress post
pub fn compose_post_body(
    markdown: &str,
    gallery: &[UploadedImage],
    username: &str,
    source_url: &str,
) -> String {
    let mut body = markdown_to_html(markdown);

    if let Some(block) = gallery_block(gallery) {
        body.push('\n');
        body.push_str(&block);
    }

    body.push('\n');
    body.push_str(&attribution(username, source_url));
    body
}
