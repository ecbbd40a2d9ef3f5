//! Surface safety scan over submitted source code.
//!
//! Advisory defence-in-depth only: real isolation is the remote sandbox's
//! job. The scan rejects source containing substrings associated with
//! process spawning, filesystem escape, and raw network access before
//! anything is dispatched to the executor.

/// Denied substrings. A match anywhere in the source rejects the
/// submission.
static DENIED_PATTERNS: &[&str] = &[
    // Process spawning
    "system(",
    "popen(",
    "fork(",
    "execve(",
    "subprocess",
    "os.system",
    "os.popen",
    "Runtime.getRuntime",
    "ProcessBuilder",
    "child_process",
    "std::process::Command",
    "os/exec",
    // Filesystem escape
    "/etc/passwd",
    "/etc/shadow",
    "/proc/self",
    "../..",
    // Raw network access
    "socket(",
    "java.net.Socket",
    "net.Dial",
];

/// Returns the first denied pattern found in `source`, if any.
pub fn first_denied(source: &str) -> Option<&'static str> {
    DENIED_PATTERNS
        .iter()
        .find(|pattern| source.contains(*pattern))
        .copied()
}
