use chrono::{DateTime, Local};

use crate::cgi::{CgiRequest, CgiResponse};
use crate::clock;

/// The greeter page. The timestamp keeps `ctime()`'s trailing newline inside
/// the paragraph, and nothing follows `</html>`.
#[must_use]
pub fn time_page(stamp: &DateTime<Local>) -> String {
    let formatted = clock::ctime_string(stamp);
    format!(
        "<html><head><title>C++ Program Output</title></head>\
         <body><h1>Hello from C++!</h1>\
         <p>Current system time: {formatted}\n</p>\
         </body></html>"
    )
}

#[must_use]
pub fn time_response(stamp: &DateTime<Local>) -> CgiResponse {
    CgiResponse::html(time_page(stamp))
}

/// The echo page: the request method and query string, as the web server
/// handed them over. Both are attacker-controlled, so both get escaped.
#[must_use]
pub fn echo_page(request: &CgiRequest) -> String {
    format!(
        "<html><body>\
         <h1>CGI Script Output</h1>\
         <p>QUERY_STRING: {}</p>\
         <p>REQUEST_METHOD: {}</p>\
         </body></html>",
        html_escape(&request.query_string),
        html_escape(&request.method),
    )
}

#[must_use]
pub fn echo_response(request: &CgiRequest) -> CgiResponse {
    CgiResponse::html(echo_page(request))
}

#[must_use]
pub fn html_escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
