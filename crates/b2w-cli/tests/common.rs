#![allow(dead_code)]

use std::{
    fs::{self, File},
    io::Read,
    path::{Path, PathBuf},
};

use assert_cmd::assert::Assert;
use serde_json::Value;
use tempfile::TempDir;
use zip::ZipArchive;

pub struct Fixture {
    pub temp: TempDir,
    pub binary: PathBuf,
    pub dist: PathBuf,
}

/// A scratch dir with an executable shell script and an empty `dist/`.
pub fn prepare_fixture(prefix: &str) -> Fixture {
    let temp = tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .expect("tempdir");
    let binary = write_binary(temp.path(), "fake-binary", b"#!/bin/sh\necho hello\n");
    let dist = temp.path().join("dist");
    fs::create_dir_all(&dist).expect("dist dir");
    Fixture { temp, binary, dist }
}

pub fn write_binary(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write binary");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod");
    }
    path
}

pub fn wheels_in(dir: &Path) -> Vec<PathBuf> {
    let mut wheels: Vec<_> = fs::read_dir(dir)
        .expect("read dist")
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("whl"))
        })
        .collect();
    wheels.sort();
    wheels
}

pub fn read_member(wheel: &Path, name: &str) -> String {
    let mut archive = ZipArchive::new(File::open(wheel).expect("open wheel")).expect("zip");
    let mut member = archive.by_name(name).expect("member present");
    let mut text = String::new();
    member.read_to_string(&mut text).expect("utf8 member");
    text
}

pub fn member_names(wheel: &Path) -> Vec<String> {
    let archive = ZipArchive::new(File::open(wheel).expect("open wheel")).expect("zip");
    archive.file_names().map(str::to_string).collect()
}

pub fn parse_json(assert: &Assert) -> Value {
    serde_json::from_slice(&assert.get_output().stdout).expect("valid json")
}

pub fn stdout_of(assert: &Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stdout).into_owned()
}

pub fn stderr_of(assert: &Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stderr).into_owned()
}
