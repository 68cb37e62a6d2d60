use std::process::Command;

use timegate_core::clock;

fn run_greeter() -> (String, std::process::ExitStatus) {
    let output = Command::new(env!("CARGO_BIN_EXE_timegate-cgi"))
        .output()
        .expect("greeter binary runs");
    (String::from_utf8(output.stdout).expect("output is UTF-8"), output.status)
}

fn embedded_time(page: &str) -> &str {
    let start = page
        .find("Current system time: ")
        .expect("time paragraph present")
        + "Current system time: ".len();
    let end = page[start..].find("\n</p>").expect("time ends the paragraph") + start;
    &page[start..end]
}

#[test]
fn header_then_exactly_one_blank_line() {
    let (output, _) = run_greeter();
    let rest = output
        .strip_prefix("Content-Type: text/html\n\n")
        .expect("CGI header block prefix");
    assert!(rest.starts_with("<html>"), "body follows the blank line immediately");
}

#[test]
fn fixed_title_and_heading() {
    let (output, _) = run_greeter();
    assert!(output.contains("<title>C++ Program Output</title>"));
    assert!(output.contains("<h1>Hello from C++!</h1>"));
}

#[test]
fn embedded_time_is_current() {
    let before = clock::now().naive_local();
    let (output, _) = run_greeter();
    let parsed = clock::parse_ctime(embedded_time(&output)).unwrap();
    let delta = (clock::now().naive_local() - parsed).num_seconds().abs();
    assert!(delta <= 2, "time drifted by {delta}s from invocation at {before}");
}

#[test]
fn exits_zero() {
    let (_, status) = run_greeter();
    assert!(status.success());
}

#[test]
fn consecutive_runs_are_monotonic() {
    let (first, _) = run_greeter();
    let (second, _) = run_greeter();
    let first_time = clock::parse_ctime(embedded_time(&first)).unwrap();
    let second_time = clock::parse_ctime(embedded_time(&second)).unwrap();
    assert!(second_time >= first_time);
}

#[test]
fn nothing_after_closing_html() {
    let (output, _) = run_greeter();
    assert!(output.ends_with("</body></html>"));
}

#[test]
fn echo_reflects_cgi_environment() {
    let output = Command::new(env!("CARGO_BIN_EXE_timegate-echo"))
        .env("REQUEST_METHOD", "GET")
        .env("QUERY_STRING", "name=world")
        .output()
        .expect("echo binary runs");
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.starts_with("Content-Type: text/html\n\n"));
    assert!(text.contains("<p>QUERY_STRING: name=world</p>"));
    assert!(text.contains("<p>REQUEST_METHOD: GET</p>"));
}

#[test]
fn echo_escapes_markup_in_query() {
    let output = Command::new(env!("CARGO_BIN_EXE_timegate-echo"))
        .env("REQUEST_METHOD", "GET")
        .env("QUERY_STRING", "<b>x</b>")
        .output()
        .expect("echo binary runs");
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.contains("&lt;b&gt;x&lt;/b&gt;"));
    assert!(!text.contains("<b>x</b>"));
}
