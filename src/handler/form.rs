//! Form page and form submission
//!
//! GET renders a static page; POST decodes the two fields (urlencoded or
//! multipart), overwrites the prompt record and redirects to the download
//! route.

use crate::config::AppState;
use crate::http::{self, form};
use crate::logger;
use crate::record::PromptRecord;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::{Request, Response};

/// Serve the prompt form page
pub fn serve_form(is_head: bool) -> Response<Full<Bytes>> {
    http::build_html_response(FORM_PAGE, is_head)
}

/// Handle a form submission
///
/// Missing fields are stored as empty strings. A failed write is answered
/// with 500 and the previous record, if any, may already be truncated.
pub async fn submit_form<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let content_type = req
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    let max_body_size = usize::try_from(state.config.http.max_body_size).unwrap_or(usize::MAX);
    let body = match Limited::new(req.into_body(), max_body_size).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.is::<LengthLimitError>() => {
            logger::log_warning(&format!(
                "Form body exceeds max_body_size ({max_body_size} bytes)"
            ));
            return http::build_413_response();
        }
        Err(e) => {
            logger::log_warning(&format!("Failed to read form body: {e}"));
            return http::build_400_response();
        }
    };

    let fields = match form::decode_form(content_type.as_deref(), body).await {
        Ok(fields) => fields,
        Err(e) => {
            logger::log_warning(&format!("Malformed multipart form body: {e}"));
            return http::build_400_response();
        }
    };
    let record = PromptRecord::from_fields(&fields);

    match state.store.save(&record).await {
        Ok(()) => {
            logger::log_record_saved(&state.store.path(), record.render().len());
            http::build_redirect_response(&state.config.routes.download_path)
        }
        Err(e) => {
            logger::log_error(&format!("Failed to save prompt record: {e}"));
            http::build_500_response()
        }
    }
}

const FORM_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Template Generator</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
            background: #f5f5f7;
            display: flex;
            justify-content: center;
            padding: 40px 16px;
        }
        form {
            background: white;
            padding: 32px;
            border-radius: 12px;
            box-shadow: 0 4px 16px rgba(0, 0, 0, 0.08);
            width: 100%;
            max-width: 480px;
        }
        label {
            display: block;
            font-weight: 600;
            margin: 16px 0 6px;
        }
        textarea, input {
            width: 100%;
            box-sizing: border-box;
            padding: 10px;
            border: 1px solid #ccc;
            border-radius: 6px;
            font: inherit;
        }
        button {
            margin-top: 24px;
            padding: 10px 20px;
            border: none;
            border-radius: 6px;
            background: #764ba2;
            color: white;
            font-weight: 600;
            cursor: pointer;
        }
    </style>
</head>
<body>
    <form method="post" action="/">
        <h1>Template Generator</h1>
        <label for="prompt">Prompt</label>
        <textarea id="prompt" name="prompt" rows="5" placeholder="Describe the post you want"></textarea>

        <label for="template_type">Template type</label>
        <input id="template_type" name="template_type" list="template_types" placeholder="post">
        <datalist id="template_types">
            <option value="post">
            <option value="story">
            <option value="reel">
            <option value="carousel">
        </datalist>

        <button type="submit">Generate</button>
    </form>
</body>
</html>"#;
