use url::{Url, form_urlencoded};

use crate::{
    assets::image_codec::ImageCodecOpts,
    card::{
        escape::encode_uri_component,
        model::Card,
        payload::SharedPayload,
    },
    foundation::error::{CardError, CardResult},
};

/// Query parameter carrying the card token.
pub const CARD_PARAM: &str = "card";

/// Options controlling share links and the scannable-code request.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShareOpts {
    /// Scheme + host (+ port) of the viewer.
    pub origin: String,
    /// Path of the viewer page.
    pub path: String,
    /// Upper bound for the full link length, in characters.
    pub max_url_len: usize,
    /// Base URL of the external QR image endpoint.
    pub qr_endpoint: String,
    /// Edge length of the requested QR image, in pixels.
    pub qr_size: u32,
}

impl Default for ShareOpts {
    fn default() -> Self {
        Self {
            origin: "http://localhost:8080".to_string(),
            path: "/".to_string(),
            max_url_len: 2000,
            qr_endpoint: "https://chart.googleapis.com/chart".to_string(),
            qr_size: 250,
        }
    }
}

impl ShareOpts {
    pub fn validate(&self) -> CardResult<()> {
        if self.max_url_len == 0 {
            return Err(CardError::validation("share.max_url_len must be > 0"));
        }
        viewer_url(self).map(|_| ())
    }
}

/// A successfully encoded card, ready to be handed out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareLink {
    /// Link token (the `card` parameter value).
    pub token: String,
    /// Full shareable link.
    pub url: String,
    /// Request URL for a scannable image of `url`.
    pub qr_url: String,
}

/// Embed `token` into the link template, enforcing the length budget.
///
/// The token is placed in the query as-is; base64 characters are valid there, matching what a
/// browser `btoa` link looks like.
pub fn share_url(token: &str, opts: &ShareOpts) -> CardResult<String> {
    let mut url = viewer_url(opts)?;
    url.set_query(Some(&format!("{CARD_PARAM}={token}")));
    let url = String::from(url);
    let len = url.chars().count();
    if len > opts.max_url_len {
        return Err(CardError::payload_too_large(len, opts.max_url_len));
    }
    Ok(url)
}

fn viewer_url(opts: &ShareOpts) -> CardResult<Url> {
    let mut url = Url::parse(&opts.origin).map_err(|e| {
        CardError::validation(format!("share origin '{}' is not a URL: {e}", opts.origin))
    })?;
    if url.cannot_be_a_base() {
        return Err(CardError::validation(format!(
            "share origin '{}' cannot carry a path",
            opts.origin
        )));
    }
    url.set_path(&opts.path);
    Ok(url)
}

/// Build the request URL of the external scannable-code image for `link`.
pub fn qr_request_url(link: &str, opts: &ShareOpts) -> String {
    format!(
        "{}?cht=qr&chs={size}x{size}&chl={}",
        opts.qr_endpoint,
        encode_uri_component(link),
        size = opts.qr_size
    )
}

/// Render `link` as a scannable code locally, as an SVG document.
pub fn render_qr_svg(link: &str, size: u32) -> CardResult<String> {
    use qrcode::{QrCode, render::svg};

    let code = QrCode::new(link.as_bytes())
        .map_err(|e| CardError::validation(format!("link cannot be encoded as a QR code: {e}")))?;
    Ok(code
        .render()
        .min_dimensions(size, size)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build())
}

/// Encode `card` into a share link and its scannable-code request.
///
/// The card is only read; on any failure (unreadable image, oversized link) nothing changes.
#[tracing::instrument(skip(card, share_opts), fields(title = %card.title))]
pub fn encode_card(
    card: &Card,
    codec_opts: &ImageCodecOpts,
    share_opts: &ShareOpts,
) -> CardResult<ShareLink> {
    let payload = SharedPayload::from_card(card, codec_opts)?;
    if payload.messages.is_empty() {
        return Err(CardError::validation(
            "add at least one image with a wish before sharing",
        ));
    }
    let token = payload.encode_token()?;
    let url = share_url(&token, share_opts)?;
    let qr_url = qr_request_url(&url, share_opts);
    tracing::info!(
        messages = payload.messages.len(),
        url_len = url.len(),
        "encoded share link"
    );
    Ok(ShareLink { token, url, qr_url })
}

/// Extract the `card` parameter from a full URL, a `?query` or a bare query string.
///
/// The value is form-decoded, so a literal `+` reads back as a space;
/// [`SharedPayload::decode_token`] maps it back. Malformed escapes are left in place for the
/// token decoder to reject.
pub fn card_param(location: &str) -> Option<String> {
    let url = location_url(location)?;
    form_urlencoded::parse(url.query()?.as_bytes())
        .find(|(k, _)| k == CARD_PARAM)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

/// Drop the query and fragment from `location`, leaving `origin + path`. Used when returning to
/// the editor so a reload does not reopen the shared card.
pub fn clear_card_param(location: &str) -> String {
    match Url::parse(location) {
        Ok(mut url) => {
            url.set_query(None);
            url.set_fragment(None);
            url.into()
        }
        Err(_) => location
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}

/// Placeholder base for resolving relative locations (`?card=...`, `card=...`).
const RELATIVE_BASE: &str = "http://localhost/";

fn location_url(location: &str) -> Option<Url> {
    match Url::parse(location) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse(RELATIVE_BASE).ok()?;
            if location.contains(['?', '/']) {
                base.join(location).ok()
            } else {
                base.join(&format!("?{location}")).ok()
            }
        }
        Err(_) => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/card/share.rs"]
mod tests;
