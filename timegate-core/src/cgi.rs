use std::env;
use std::io::Write;

use anyhow::{Result, anyhow};

/// The CGI variables a script consumes, per the server originals. Anything
/// the web server did not set reads as absent.
#[derive(Debug, Default, Clone)]
pub struct CgiRequest {
    pub method: String,
    pub query_string: String,
    pub path_info: String,
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
}

impl CgiRequest {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(env::vars())
    }

    pub fn from_vars<I: IntoIterator<Item = (String, String)>>(vars: I) -> Self {
        let mut request = Self::default();
        for (name, value) in vars {
            match name.as_str() {
                "REQUEST_METHOD" => request.method = value,
                "QUERY_STRING" => request.query_string = value,
                "PATH_INFO" => request.path_info = value,
                "CONTENT_TYPE" => request.content_type = Some(value),
                "CONTENT_LENGTH" => request.content_length = value.parse().ok(),
                _ => {}
            }
        }
        request
    }
}

/// A CGI response: ordered headers, one blank separator line, then the body.
#[derive(Debug, Clone)]
pub struct CgiResponse {
    headers: Vec<(String, String)>,
    body: String,
}

impl CgiResponse {
    #[must_use]
    pub fn html(body: String) -> Self {
        Self {
            headers: vec![("Content-Type".to_string(), "text/html".to_string())],
            body,
        }
    }

    pub fn push_header(&mut self, name: &str, value: &str) {
        self.headers.push((name.to_string(), value.to_string()));
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        for (name, value) in &self.headers {
            writeln!(out, "{name}: {value}")?;
        }
        writeln!(out)?;
        out.write_all(self.body.as_bytes())?;
        Ok(())
    }

    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_to(&mut buf);
        buf
    }
}

/// What a CGI program wrote to stdout, split back apart by the gateway.
#[derive(Debug)]
pub struct CgiOutput {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// Splits raw CGI stdout into its header block and body. Lines may end in
/// either `\n` or `\r\n`; the `Status:` pseudo-header sets the HTTP status
/// and is not forwarded as a header.
pub fn parse_cgi_output(raw: &[u8]) -> Result<CgiOutput> {
    let mut status = 200;
    let mut headers = Vec::new();
    let mut rest = raw;

    loop {
        let eol = rest
            .iter()
            .position(|&b| b == b'\n')
            .ok_or_else(|| anyhow!("CGI output has no header/body separator"))?;
        let line = &rest[..eol];
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        rest = &rest[eol + 1..];

        if line.is_empty() {
            break;
        }
        let line = std::str::from_utf8(line)
            .map_err(|_| anyhow!("CGI header line is not valid UTF-8"))?;
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| anyhow!("Malformed CGI header line: {line:?}"))?;
        let (name, value) = (name.trim(), value.trim());
        if name.eq_ignore_ascii_case("status") {
            let code = value.split_whitespace().next().unwrap_or("");
            status = code
                .parse()
                .map_err(|_| anyhow!("Malformed CGI Status header: {value:?}"))?;
        } else {
            headers.push((name.to_string(), value.to_string()));
        }
    }

    Ok(CgiOutput { status, headers, body: rest.to_vec() })
}
