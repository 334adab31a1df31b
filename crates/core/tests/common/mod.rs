#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const ELIGIBLE: &str = r#"package demo;

import java.util.*;

class Orders {
    void run() {
        String label = "orders";
        ArrayList<String> names = new ArrayList<String>();
        int count = 0;
    }
}
"#;

pub const BROKEN: &str = "package demo;\nclass Broken {\n  void m() { int x = ; }\n}\n";

pub const NOTHING_TO_DO: &str = r#"class Done {
    int field = 1;
    void m(String p) {
        var s = p;
        String t;
    }
}
"#;

/// A temporary source tree holding the given relative paths.
pub fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    for (rel, content) in files {
        let path = dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create dirs");
        }
        fs::write(&path, content).expect("write file");
    }
    dir
}

pub fn path_in(dir: &TempDir, rel: &str) -> PathBuf {
    dir.path().join(rel)
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).expect("read file")
}
