use crate::config::Config;
use anyhow::{Result, anyhow};
use std::{
    path::{Component, Path, PathBuf},
    sync::OnceLock,
};

static CONFIG: OnceLock<Config> = OnceLock::new();

pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(|| {
        Config::load().unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config: {e}");
            eprintln!("Using default configuration");
            Config::default()
        })
    })
}

/// Where a request path lands: a file under the public dir, a CGI program
/// under the cgi-bin dir (with whatever trails the program as `PATH_INFO`),
/// or nowhere.
#[derive(Debug, PartialEq, Eq)]
pub enum Route {
    Static(PathBuf),
    Cgi { program: PathBuf, path_info: String },
    NotFound,
}

/// Turns a request URI path into a relative filesystem path, rejecting
/// anything that could climb out of the served directories.
pub fn sanitize_request_path(raw: &str) -> Result<PathBuf> {
    let trimmed = raw.trim_start_matches('/');
    let relative = Path::new(trimmed);
    for component in relative.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            _ => return Err(anyhow!("Refusing path traversal in request: {raw:?}")),
        }
    }
    Ok(relative.to_path_buf())
}

#[must_use]
pub fn resolve(config: &Config, request_path: &str) -> Route {
    let Ok(mut relative) = sanitize_request_path(request_path) else {
        return Route::NotFound;
    };
    if request_path.is_empty() || request_path.ends_with('/') {
        relative.push(&config.server.index);
    }

    let static_path = config.paths.public.join(&relative);
    if static_path.is_file() {
        return Route::Static(static_path);
    }

    // A CGI request may carry extra path segments after the program name;
    // the longest prefix naming an existing file is the program, the rest
    // becomes PATH_INFO.
    let mut program = config.paths.cgi_bin.clone();
    let mut components = relative.components();
    while let Some(component) = components.next() {
        program.push(component);
        if program.is_file() {
            let trailing = components.as_path();
            let path_info = if trailing.as_os_str().is_empty() {
                String::new()
            } else {
                format!("/{}", trailing.to_string_lossy())
            };
            return Route::Cgi { program, path_info };
        }
    }

    Route::NotFound
}
