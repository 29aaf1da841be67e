//! `sh -c` job specs for exercising the runner against real processes,
//! without depending on any actual downloader being installed.

use clipfetch::job::JobSpec;

/// A job that runs `script` under `sh -c`.
pub fn sh_job(script: &str) -> JobSpec {
    JobSpec::new("sh", vec!["-c".to_string(), script.to_string()])
}

/// A job that prints the given lines to stdout, one per line, then exits
/// with `exit_code`.
pub fn lines_job(lines: &[&str], exit_code: i32) -> JobSpec {
    let mut script = String::new();
    for line in lines {
        script.push_str("printf '%s\\n' ");
        script.push_str(&shell_quote(line));
        script.push_str("; ");
    }
    script.push_str(&format!("exit {exit_code}"));
    sh_job(&script)
}

/// A job that prints the given lines to stderr, then exits with `exit_code`.
pub fn stderr_lines_job(lines: &[&str], exit_code: i32) -> JobSpec {
    let mut script = String::new();
    for line in lines {
        script.push_str("printf '%s\\n' ");
        script.push_str(&shell_quote(line));
        script.push_str(" >&2; ");
    }
    script.push_str(&format!("exit {exit_code}"));
    sh_job(&script)
}

/// A job that sleeps for `secs` seconds and exits 0. Used where the test
/// needs a window in which the job is reliably still running.
pub fn sleep_job(secs: f64) -> JobSpec {
    sh_job(&format!("sleep {secs}"))
}

/// Single-quote `s` for embedding in an `sh -c` script.
fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}
