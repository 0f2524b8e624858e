use std::{
  fs,
  os::unix::fs::PermissionsExt,
  path::{Path, PathBuf},
  sync::Mutex,
};

use crate::options::Runtime;

/// Held by tests that change or depend on the process working directory.
pub static CWD_LOCK: Mutex<()> = Mutex::new(());

/// Writes an executable `/bin/sh` script standing in for an interpreter.
pub fn fake_runtime(dir: &Path, name: &str, body: &str) -> Runtime {
  let path = dir.join(name);
  fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
  fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

  Runtime::new(path)
}

/// Creates `relative` (and its parents) under `root` with `contents`.
pub fn workload_file(root: &Path, relative: &str, contents: &str) -> PathBuf {
  let path = root.join(relative);
  fs::create_dir_all(path.parent().unwrap()).unwrap();
  fs::write(&path, contents).unwrap();

  path
}
