//! Prompt record download

use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime};
use crate::logger;
use crate::record::RecordStore;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;

/// Send the prompt record as an attachment
///
/// 404 until the first submission has been saved.
pub async fn serve_download(ctx: &RequestContext, store: &RecordStore) -> Response<Full<Bytes>> {
    let data = match store.load().await {
        Ok(data) => data,
        // Downloading before any submit is expected, no need to log
        Err(e) if e.is_not_found() => return http::build_404_response(),
        Err(e) => {
            logger::log_error(&format!("Failed to read prompt record: {e}"));
            return http::build_500_response();
        }
    };

    let etag = cache::generate_etag(&data);
    if cache::check_etag_match(ctx.if_none_match.as_deref(), &etag) {
        return http::build_304_response(&etag);
    }

    let file_name = store.file_name();
    let content_type = mime::get_content_type(Path::new(file_name).extension().and_then(|e| e.to_str()));

    http::build_attachment_response(Bytes::from(data), content_type, file_name, &etag, ctx.is_head)
}
