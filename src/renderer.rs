//! HTML card rendering.
//!
//! The card is a fixed template with five substitution points. By default the
//! values are inserted verbatim, so markup inside a page's meta tags ends up in
//! the card; use [`EscapeMode::Html`] when the source page is not trusted.

use crate::LinkMetadata;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EscapeMode {
    /// Insert values as they were declared by the page.
    #[default]
    Raw,
    /// Entity-encode values for their text or attribute position.
    Html,
}

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub escape: EscapeMode,
}

/// Renders `data` into the card fragment without escaping.
pub fn render(data: &LinkMetadata) -> String {
    render_with_options(data, &RenderOptions::default())
}

pub fn render_with_options(data: &LinkMetadata, options: &RenderOptions) -> String {
    let (url, image, site_name, title, description) = match options.escape {
        EscapeMode::Raw => (
            Cow::Borrowed(data.url.as_str()),
            Cow::Borrowed(data.image.as_str()),
            Cow::Borrowed(data.site_name.as_str()),
            Cow::Borrowed(data.title.as_str()),
            Cow::Borrowed(data.description.as_str()),
        ),
        EscapeMode::Html => (
            encode_double_quoted_attribute(&data.url),
            encode_double_quoted_attribute(&data.image),
            encode_text(&data.site_name),
            encode_text(&data.title),
            encode_text(&data.description),
        ),
    };

    format!(
        r#"<div style="text-align:center;">
  <div style="display:inline-block; max-width:640px; margin:20px auto; border:1px solid #ddd; font-family: Arial, sans-serif;">
    <a href="{url}" target="_blank" style="text-decoration:none; color:#000;">
      <div>
        <img src="{image}" alt="Article Image" style="width:100%; height:auto;">
      </div>
      <div style="background-color:#F0F2F5; padding:5px 10px; text-align:left;">
        <p style="font-size:12px; color:#777; margin:0;">{site_name}</p>
        <h2 style="font-size:16px; margin:3px 0; font-weight:bold; line-height:1.2;">{title}</h2>
        <p style="font-size:14px; color:#555; margin:3px 0; line-height:1.2;">{description}</p>
      </div>
    </a>
  </div>
</div>"#
    )
}
