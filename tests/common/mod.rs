// Common test utilities and fixtures

use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Scratch directory holding a page, a history store and a fake home
pub struct Workspace {
    pub dir: TempDir,
}

#[allow(dead_code)]
impl Workspace {
    pub fn new() -> Self {
        Workspace {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn write_page(&self, name: &str, html: &str) -> String {
        let path = self.dir.path().join(name);
        std::fs::write(&path, html).expect("Failed to write page");
        path.to_string_lossy().to_string()
    }

    pub fn store(&self) -> PathBuf {
        self.dir.path().join("storage.json")
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Run selprobe with HOME pointed into the workspace
    pub fn run(&self, args: &[&str]) -> Output {
        self.run_with_stdin(args, None)
    }

    pub fn run_with_stdin(&self, args: &[&str], stdin: Option<&str>) -> Output {
        run_in(self.dir.path(), args, stdin)
    }
}

/// Captured result of one selprobe invocation
pub struct Output {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

#[allow(dead_code)]
impl Output {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.stdout).unwrap_or_else(|e| {
            panic!(
                "stdout is not JSON ({}):\n{}\nstderr:\n{}",
                e, self.stdout, self.stderr
            )
        })
    }
}

fn run_in(home: &Path, args: &[&str], stdin: Option<&str>) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_selprobe"))
        .args(args)
        .env("HOME", home)
        .env("RUST_LOG", "selprobe=warn")
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn selprobe");

    if let Some(input) = stdin {
        let mut pipe = child.stdin.take().expect("stdin is piped");
        pipe.write_all(input.as_bytes()).expect("Failed to write stdin");
    }

    let output = child.wait_with_output().expect("Failed to wait for selprobe");
    Output {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(-1),
    }
}

/// Mock HTML pages for testing
#[allow(dead_code)]
pub mod fixtures {
    pub const SHOP_PAGE: &str = r#"
    <!DOCTYPE html>
    <html>
    <head><title>Shop</title></head>
    <body>
        <nav class="top"><a href="/">Home</a><a href="/cart">Cart</a></nav>
        <ul id="products">
            <li class="product"><span class="name">Lamp</span></li>
            <li class="product"><span class="name">Desk</span></li>
            <li class="product"><span class="name">Chair</span></li>
        </ul>
        <form>
            <input name="q">
            <button class="btn primary" data-testid="submit-btn">Search</button>
            <button class="btn">Reset</button>
        </form>
        <table>
            <tr><td>a1</td><td>a2</td></tr>
            <tr><td>b1</td><td>b2</td></tr>
            <tr><td>c1</td><td>c2</td></tr>
        </table>
    </body>
    </html>
    "#;

    pub const SPAN_PAGE: &str =
        r#"<html><body><div id="x"><span>A</span><span>B</span></div></body></html>"#;
}
