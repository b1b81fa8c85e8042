//! Python modules that locate and exec the bundled binary once installed.

/// `{module}/__init__.py`: version constant, `get_binary_path()` and `main()`.
#[must_use]
pub fn render_init_module(version: &str, binary_name: &str) -> String {
    let version = python_string(version);
    let binary_name = python_string(binary_name);
    format!(
        r#""""Launcher for the bundled native executable."""

import os
import stat
import sys

__version__ = {version}

_BINARY_NAME = {binary_name}


def get_binary_path():
    """Return the path of the executable under this package's bin/ directory."""
    bin_dir = os.path.join(os.path.dirname(os.path.abspath(__file__)), "bin")
    path = os.path.join(bin_dir, _BINARY_NAME)
    if sys.platform == "win32" and not os.path.exists(path):
        if not path.lower().endswith(".exe"):
            path = path + ".exe"
    return path


def _ensure_executable(path):
    if sys.platform == "win32":
        return
    mode = os.stat(path).st_mode
    wanted = stat.S_IXUSR | stat.S_IXGRP | stat.S_IXOTH
    if mode & wanted != wanted:
        os.chmod(path, mode | wanted)


def main():
    path = get_binary_path()
    if not os.path.exists(path):
        sys.stderr.write("%s: bundled binary not found at %s\n" % (_BINARY_NAME, path))
        sys.exit(1)
    _ensure_executable(path)
    args = [path] + sys.argv[1:]
    if sys.platform == "win32":
        import subprocess

        sys.exit(subprocess.call(args))
    os.execv(path, args)
"#
    )
}

/// `{module}/__main__.py` so `python -m {module}` runs the binary.
#[must_use]
pub fn render_main_module() -> String {
    "from . import main\n\nif __name__ == \"__main__\":\n    main()\n".to_string()
}

fn python_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}
