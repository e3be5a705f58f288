use std::io::{BufRead, Write};

use crate::api::TriggerClient;
use crate::form::{month_name, Form, Status};

pub struct Terminal<R, W> {
    input: R,
    out: W,
    /// Skip the confirmation prompt.
    pub assume_yes: bool,
    /// Submit once and return instead of looping back to `Idle`.
    pub once: bool,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self {
            input,
            out,
            assume_yes: false,
            once: false,
        }
    }

    /// Drives the form until the user quits, input ends, or (in `once` mode)
    /// the first submission resolves. Returns the final status.
    pub async fn run(&mut self, form: &mut Form, client: &TriggerClient) -> anyhow::Result<Status> {
        loop {
            match form.status() {
                Status::Idle => {
                    writeln!(self.out, "Month: {} | Year: {}", month_name(form.month()), form.year())?;
                    if !self.once {
                        let Some(line) = self.prompt(&format!(
                            "Month [1-12, enter keeps {}, q quits]: ",
                            form.month()
                        ))?
                        else {
                            break;
                        };
                        match line.as_str() {
                            "q" => break,
                            "" => {}
                            other => {
                                let selected = other
                                    .parse::<u32>()
                                    .map_err(|_| anyhow::anyhow!("'{}' is not a month", other))
                                    .and_then(|m| form.select_month(m).map_err(Into::into));
                                if let Err(err) = selected {
                                    writeln!(self.out, "{}", err)?;
                                    continue;
                                }
                            }
                        }
                    }
                    form.request_confirmation()?;
                }
                Status::Confirm => {
                    let confirmed = self.assume_yes || {
                        let question =
                            format!("Generate the settlement for {}? [y/N]: ", form.label());
                        matches!(
                            self.prompt(&question)?.as_deref(),
                            Some("y") | Some("Y") | Some("yes")
                        )
                    };
                    if !confirmed {
                        form.cancel()?;
                        if self.once {
                            break;
                        }
                        continue;
                    }

                    let request = form.submit()?;
                    writeln!(self.out, "Generating and sending…")?;
                    let outcome = client.submit(request).await;
                    form.finish(outcome)?;
                }
                Status::Loading => {
                    anyhow::bail!("submission left pending");
                }
                Status::Success | Status::Error => {
                    let tag = if form.status() == Status::Success {
                        "ok"
                    } else {
                        "error"
                    };
                    writeln!(self.out, "[{}] {}", tag, form.message())?;
                    if self.once {
                        break;
                    }
                    match self.prompt("Enter resets, q quits: ")?.as_deref() {
                        None | Some("q") => break,
                        Some(_) => form.reset()?,
                    }
                }
            }
        }
        Ok(form.status())
    }

    fn prompt(&mut self, question: &str) -> anyhow::Result<Option<String>> {
        write!(self.out, "{}", question)?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::io::Cursor;
    use tokio::net::TcpListener;

    async fn spawn_api() -> String {
        let app = Router::new().route(
            "/api/trigger",
            post(|Json(body): Json<Value>| async move {
                if body["month"] == 13 {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(json!({"ok": false, "error": "invalid month"})),
                    );
                }
                (
                    StatusCode::OK,
                    Json(json!({
                        "ok": true,
                        "month": body["month"],
                        "year": body["year"],
                        "timestamp": "2026-05-01T08:00:00.000Z"
                    })),
                )
            }),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn output(term: Terminal<Cursor<&'static str>, Vec<u8>>) -> String {
        String::from_utf8(term.out).unwrap()
    }

    #[tokio::test]
    async fn test_cancel_then_quit_never_submits() {
        // Nothing listens here; a submission would end in Error.
        let client = TriggerClient::new("http://127.0.0.1:1").unwrap();
        let mut form = Form::new(1, 2026).unwrap();
        let mut term = Terminal::new(Cursor::new("3\nn\nq\n"), Vec::new());

        let status = term.run(&mut form, &client).await.unwrap();

        assert_eq!(status, Status::Idle);
        assert_eq!(form.month(), 3);
        let out = output(term);
        assert!(out.contains("Generate the settlement for March 2026?"));
        assert!(!out.contains("Generating and sending"));
    }

    #[tokio::test]
    async fn test_header_shows_month_and_year_once() {
        let client = TriggerClient::new("http://127.0.0.1:1").unwrap();
        let mut form = Form::new(3, 2026).unwrap();
        let mut term = Terminal::new(Cursor::new("q\n"), Vec::new());

        term.run(&mut form, &client).await.unwrap();

        let out = output(term);
        assert!(out.starts_with("Month: March | Year: 2026\n"));
        assert!(!out.contains("March 2026 | Year"));
    }

    #[tokio::test]
    async fn test_invalid_month_input_is_reported() {
        let client = TriggerClient::new("http://127.0.0.1:1").unwrap();
        let mut form = Form::new(1, 2026).unwrap();
        let mut term = Terminal::new(Cursor::new("14\nabc\nq\n"), Vec::new());

        term.run(&mut form, &client).await.unwrap();

        let out = output(term);
        assert!(out.contains("month must be between 1 and 12, got 14"));
        assert!(out.contains("'abc' is not a month"));
        assert_eq!(form.month(), 1);
    }

    #[tokio::test]
    async fn test_submit_success_then_reset() {
        let base = spawn_api().await;
        let client = TriggerClient::new(&base).unwrap();
        let mut form = Form::new(5, 2026).unwrap();
        let mut term = Terminal::new(Cursor::new("\ny\n\nq\n"), Vec::new());

        let status = term.run(&mut form, &client).await.unwrap();

        assert_eq!(status, Status::Idle);
        let out = output(term);
        assert!(out.contains("[ok] Settlement for May 2026 sent. Timestamp: 2026-05-01T08:00:00Z"));
    }

    #[tokio::test]
    async fn test_once_mode_reports_final_status() {
        let base = spawn_api().await;
        let client = TriggerClient::new(&base).unwrap();
        let mut form = Form::new(2, 2026).unwrap();
        let mut term = Terminal::new(Cursor::new(""), Vec::new());
        term.assume_yes = true;
        term.once = true;

        let status = term.run(&mut form, &client).await.unwrap();

        assert_eq!(status, Status::Success);
        assert!(output(term).contains("Settlement for February 2026 sent."));
    }
}
