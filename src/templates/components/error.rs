use crate::errors::ServerError;
use crate::templates::desktop_layout;
use astra::{Body, Response, ResponseBuilder};
use maud::html;
use tracing::{error, warn};

/// Render a ServerError as a full HTML page with the matching status.
pub fn html_error_response(err: ServerError) -> Response {
    let status = err.status();
    let message = match &err {
        ServerError::NotFound => "Not Found".to_string(),
        ServerError::BadRequest(msg) => msg.clone(),
        ServerError::Upstream(provider) => provider.user_message().to_string(),
        ServerError::InternalError => "Internal Server Error".to_string(),
    };

    if status >= 500 {
        error!(%status, error = %err, "request failed");
    } else {
        warn!(%status, error = %err, "request rejected");
    }

    let page = desktop_layout(
        &format!("Error {status}"),
        html! {
            h1 { "Error " (status) }
            p { (message) }
            p { a href="/" { "← Back to rooms" } }
        },
    );

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(page.into_string()))
        .unwrap_or_else(|_| Response::new(Body::from(String::from("Internal Server Error"))))
}
