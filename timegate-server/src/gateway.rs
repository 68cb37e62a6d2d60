use std::path::Path;
use std::process::Stdio;

use anyhow::{Context, Result, ensure};
use hyper::header::{self, HeaderValue};
use hyper::{Body, Method, Request, Response, StatusCode};
use timegate_core::cgi;
use timegate_core::config::Config;
use timegate_core::serve::{Route, resolve};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{error, info, warn};

pub async fn handle_request(
    config: &'static Config,
    req: Request<Body>,
) -> Result<Response<Body>, hyper::Error> {
    let path = req.uri().path().to_string();
    match resolve(config, &path) {
        Route::Static(file) => {
            info!("Serving static file: {}", file.display());
            Ok(static_response(&file).await)
        }
        Route::Cgi { program, path_info } => {
            info!("Executing CGI program: {}", program.display());
            match run_cgi(&program, &path_info, req).await {
                Ok(response) => Ok(response),
                Err(e) => {
                    error!("CGI program {} failed: {e:#}", program.display());
                    Ok(plain(StatusCode::BAD_GATEWAY, "CGI program error"))
                }
            }
        }
        Route::NotFound => {
            warn!("No file or CGI program for: {path}");
            Ok(plain(StatusCode::NOT_FOUND, "Not found"))
        }
    }
}

fn plain(status: StatusCode, message: &'static str) -> Response<Body> {
    let mut response = Response::new(Body::from(message));
    *response.status_mut() = status;
    response
}

async fn static_response(path: &Path) -> Response<Body> {
    let mime_type = mime_guess::from_path(path).first_or_text_plain();
    match tokio::fs::read(path).await {
        Ok(content) => {
            let mut response = Response::new(Body::from(content));
            let value = HeaderValue::from_str(mime_type.as_ref())
                .unwrap_or_else(|_| HeaderValue::from_static("text/plain"));
            response.headers_mut().insert(header::CONTENT_TYPE, value);
            response
        }
        Err(e) => {
            error!("Failed to read {}: {e}", path.display());
            plain(StatusCode::INTERNAL_SERVER_ERROR, "Failed to read the requested file")
        }
    }
}

async fn run_cgi(program: &Path, path_info: &str, req: Request<Body>) -> Result<Response<Body>> {
    let method = req.method().clone();
    let query = req.uri().query().unwrap_or("").to_string();

    let mut cmd = Command::new(program);
    cmd.env("GATEWAY_INTERFACE", "CGI/1.1")
        .env("REQUEST_METHOD", method.as_str())
        .env("QUERY_STRING", &query)
        .env("PATH_INFO", path_info)
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit());

    if method == Method::POST {
        if let Some(length) = req.headers().get(header::CONTENT_LENGTH) {
            cmd.env("CONTENT_LENGTH", length.to_str().unwrap_or("0"));
        }
        if let Some(content_type) = req.headers().get(header::CONTENT_TYPE) {
            cmd.env("CONTENT_TYPE", content_type.to_str().unwrap_or(""));
        }
        cmd.stdin(Stdio::piped());
    } else {
        cmd.stdin(Stdio::null());
    }

    let mut child = cmd
        .spawn()
        .with_context(|| format!("Failed to start CGI program: {}", program.display()))?;

    if method == Method::POST {
        let body = hyper::body::to_bytes(req.into_body())
            .await
            .context("Failed to read request body")?;
        if let Some(mut stdin) = child.stdin.take() {
            // Feed stdin concurrently so a chatty program cannot deadlock
            // against a full pipe.
            tokio::spawn(async move {
                let _ = stdin.write_all(&body).await;
            });
        }
    }

    let output = child
        .wait_with_output()
        .await
        .context("Failed to collect CGI program output")?;
    ensure!(output.status.success(), "CGI program exited with {}", output.status);

    let parsed = cgi::parse_cgi_output(&output.stdout)?;
    let mut builder = Response::builder().status(parsed.status);
    for (name, value) in &parsed.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
        .body(Body::from(parsed.body))
        .context("Failed to assemble response from CGI output")
}
