//! Form body decoding
//!
//! Browsers submit the prompt form as `application/x-www-form-urlencoded`;
//! `curl -F` and scripted clients send `multipart/form-data`. Both decode to
//! the same field map. Urlencoded keys and values use `+` for space and `%XX`
//! escapes; invalid UTF-8 is replaced rather than rejected.

use hyper::body::Bytes;
use percent_encoding::percent_decode_str;
use std::collections::HashMap;
use std::convert::Infallible;

pub const URLENCODED: &str = "application/x-www-form-urlencoded";
pub const MULTIPART: &str = "multipart/form-data";

/// Whether a `Content-Type` header value names an urlencoded body
pub fn is_urlencoded(content_type: Option<&str>) -> bool {
    has_mime(content_type, URLENCODED)
}

/// Whether a `Content-Type` header value names a multipart form body
pub fn is_multipart(content_type: Option<&str>) -> bool {
    has_mime(content_type, MULTIPART)
}

fn has_mime(content_type: Option<&str>, expected: &str) -> bool {
    content_type.is_some_and(|ct| {
        ct.split(';')
            .next()
            .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(expected))
    })
}

/// Decode a submitted form body according to its `Content-Type`
///
/// Bodies of any other type carry no form fields and decode to an empty map.
/// Only a malformed multipart body is an error.
pub async fn decode_form(
    content_type: Option<&str>,
    body: Bytes,
) -> Result<HashMap<String, String>, multer::Error> {
    match content_type {
        Some(ct) if is_multipart(Some(ct)) => parse_multipart(ct, body).await,
        ct if is_urlencoded(ct) => Ok(parse_urlencoded(&body)),
        _ => Ok(HashMap::new()),
    }
}

/// Decode an urlencoded body into a field map
///
/// The first occurrence of a repeated key wins. A pair without `=` is a key
/// with an empty value.
pub fn parse_urlencoded(body: &[u8]) -> HashMap<String, String> {
    let body = String::from_utf8_lossy(body);
    let mut fields = HashMap::new();

    for pair in body.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        fields
            .entry(decode_component(key))
            .or_insert_with(|| decode_component(value));
    }

    fields
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// Decode the text parts of a multipart body
///
/// The boundary comes from `content_type`. File parts (those with a
/// `filename`) are skipped, and the first part with a given name wins.
pub async fn parse_multipart(
    content_type: &str,
    body: Bytes,
) -> Result<HashMap<String, String>, multer::Error> {
    let boundary = multer::parse_boundary(content_type)?;
    let stream = futures_util::stream::once(async move { Ok::<_, Infallible>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);
    let mut fields = HashMap::new();

    while let Some(field) = multipart.next_field().await? {
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };
        let value = field.text().await?;
        fields.entry(name).or_insert(value);
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_fields() {
        let fields = parse_urlencoded(b"prompt=hello&template_type=story");
        assert_eq!(fields.get("prompt").map(String::as_str), Some("hello"));
        assert_eq!(fields.get("template_type").map(String::as_str), Some("story"));
    }

    #[test]
    fn test_plus_and_percent_decoding() {
        let fields = parse_urlencoded(b"prompt=sunset+over+the+sea%21&template_type=caf%C3%A9");
        assert_eq!(fields["prompt"], "sunset over the sea!");
        assert_eq!(fields["template_type"], "café");
    }

    #[test]
    fn test_encoded_separators_stay_in_value() {
        let fields = parse_urlencoded(b"prompt=a%26b%3Dc%2Bd&template_type=x");
        assert_eq!(fields["prompt"], "a&b=c+d");
    }

    #[test]
    fn test_empty_and_valueless_pairs() {
        let fields = parse_urlencoded(b"prompt=&&template_type");
        assert_eq!(fields["prompt"], "");
        assert_eq!(fields["template_type"], "");
        assert_eq!(fields.len(), 2);
        assert!(parse_urlencoded(b"").is_empty());
    }

    #[test]
    fn test_first_value_wins() {
        let fields = parse_urlencoded(b"prompt=first&prompt=second");
        assert_eq!(fields["prompt"], "first");
    }

    #[test]
    fn test_is_urlencoded() {
        assert!(is_urlencoded(Some("application/x-www-form-urlencoded")));
        assert!(is_urlencoded(Some("Application/X-WWW-Form-Urlencoded; charset=UTF-8")));
        assert!(!is_urlencoded(Some("multipart/form-data; boundary=x")));
        assert!(!is_urlencoded(Some("application/json")));
        assert!(!is_urlencoded(None));
    }

    fn multipart_body(parts: &[(&str, &str)]) -> Bytes {
        let mut body = String::new();
        for (name, value) in parts {
            body.push_str(&format!(
                "--XB\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        body.push_str("--XB--\r\n");
        Bytes::from(body)
    }

    #[test]
    fn test_is_multipart() {
        assert!(is_multipart(Some("multipart/form-data; boundary=XB")));
        assert!(is_multipart(Some("Multipart/Form-Data;boundary=\"XB\"")));
        assert!(!is_multipart(Some(URLENCODED)));
        assert!(!is_multipart(None));
    }

    #[tokio::test]
    async fn test_multipart_text_fields() {
        let body = multipart_body(&[("prompt", "hello\nworld"), ("template_type", "café")]);
        let fields = parse_multipart("multipart/form-data; boundary=XB", body)
            .await
            .unwrap();
        assert_eq!(fields["prompt"], "hello\nworld");
        assert_eq!(fields["template_type"], "café");
    }

    #[tokio::test]
    async fn test_multipart_first_value_wins_and_files_skipped() {
        let body = Bytes::from_static(
            b"--XB\r\n\
Content-Disposition: form-data; name=\"prompt\"; filename=\"notes.txt\"\r\n\
Content-Type: text/plain\r\n\r\n\
from a file\r\n\
--XB\r\n\
Content-Disposition: form-data; name=\"prompt\"\r\n\r\n\
first\r\n\
--XB\r\n\
Content-Disposition: form-data; name=\"prompt\"\r\n\r\n\
second\r\n\
--XB--\r\n",
        );
        let fields = parse_multipart("multipart/form-data; boundary=XB", body)
            .await
            .unwrap();
        assert_eq!(fields["prompt"], "first");
        assert_eq!(fields.len(), 1);
    }

    #[tokio::test]
    async fn test_multipart_without_boundary_is_error() {
        let body = multipart_body(&[("prompt", "hello")]);
        assert!(parse_multipart("multipart/form-data", body).await.is_err());
    }

    #[tokio::test]
    async fn test_decode_form_dispatches_on_content_type() {
        let fields = decode_form(Some(URLENCODED), Bytes::from_static(b"prompt=a+b"))
            .await
            .unwrap();
        assert_eq!(fields["prompt"], "a b");

        let body = multipart_body(&[("prompt", "hello")]);
        let fields = decode_form(Some("multipart/form-data; boundary=XB"), body)
            .await
            .unwrap();
        assert_eq!(fields["prompt"], "hello");

        let fields = decode_form(Some("application/json"), Bytes::from_static(b"{}"))
            .await
            .unwrap();
        assert!(fields.is_empty());
        assert!(decode_form(None, Bytes::new()).await.unwrap().is_empty());
    }
}
