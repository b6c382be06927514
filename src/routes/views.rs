use askama::Template;
use axum::{
    Router,
    http::StatusCode,
    response::{Html, Redirect},
    routing::get,
};

type HtmlError = (StatusCode, Html<String>);

struct EndpointDoc {
    method: &'static str,
    path: &'static str,
    request: &'static str,
    success: &'static str,
    errors: &'static str,
}

const ENDPOINTS: &[EndpointDoc] = &[
    EndpointDoc {
        method: "GET",
        path: "/api/todo?limit&offset&search",
        request: "limit 1-20 (default 10), offset >= 0 (default 0), search substring",
        success: "200 {page_number, todos}",
        errors: "400, 401",
    },
    EndpointDoc {
        method: "POST",
        path: "/api/todo",
        request: "{title, description}",
        success: "201 Todo",
        errors: "400, 401",
    },
    EndpointDoc {
        method: "PUT",
        path: "/api/todo/{id}",
        request: "{title, description, completed}",
        success: "204",
        errors: "400, 401, 404",
    },
    EndpointDoc {
        method: "DELETE",
        path: "/api/todo/{id}",
        request: "-",
        success: "204",
        errors: "400, 401, 404",
    },
];

#[derive(Template)]
#[template(path = "docs.html")]
struct DocsTemplate {
    title: &'static str,
    description: &'static str,
    endpoints: &'static [EndpointDoc],
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/docs", get(docs_view))
}

async fn index() -> Redirect {
    Redirect::temporary("/docs")
}

async fn docs_view() -> Result<Html<String>, HtmlError> {
    let rendered = DocsTemplate {
        title: "Todo Service",
        description: "todo docs",
        endpoints: ENDPOINTS,
    }
    .render()
    .map_err(|err| {
        tracing::error!(error = %err, "failed to render docs");
        html_error(StatusCode::INTERNAL_SERVER_ERROR, "failed to render docs")
    })?;
    Ok(Html(rendered))
}

fn html_error(status: StatusCode, message: &'static str) -> HtmlError {
    (status, Html(message.to_string()))
}
