#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::{symlink, PermissionsExt};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use libcensus::models::AgentConfig;

/// A fabricated host: a process root, a scripted ldd and an os-release file
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub proc_root: PathBuf,
    pub ldd: PathBuf,
    pub os_release: PathBuf,
    ldd_cases: Vec<(String, Vec<String>)>,
}

impl TestEnvironment {
    /// Create a new host with an empty process table
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let proc_root = temp_dir.path().join("proc");
        fs::create_dir(&proc_root)?;

        let os_release = temp_dir.path().join("os-release");
        fs::write(&os_release, "PRETTY_NAME=\"Ubuntu 24.04 LTS\"\nNAME=\"Ubuntu\"\n")?;

        let mut env = TestEnvironment {
            ldd: temp_dir.path().join("ldd"),
            temp_dir,
            proc_root,
            os_release,
            ldd_cases: Vec::new(),
        };
        env.write_ldd()?;
        Ok(env)
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Add a process directory; `None` leaves it without an exe link
    pub fn add_process(&self, pid: u32, exe: Option<&str>) -> anyhow::Result<()> {
        let dir = self.proc_root.join(pid.to_string());
        fs::create_dir(&dir)?;
        if let Some(exe) = exe {
            symlink(exe, dir.join("exe"))?;
        }
        Ok(())
    }

    /// Teach the fake ldd what to report for `exe`
    pub fn link(&mut self, exe: &str, libraries: &[&str]) -> anyhow::Result<()> {
        self.ldd_cases.push((
            exe.to_string(),
            libraries.iter().map(|s| s.to_string()).collect(),
        ));
        self.write_ldd()
    }

    /// Regenerate the ldd script. Unknown executables exit 1 like a static binary.
    fn write_ldd(&mut self) -> anyhow::Result<()> {
        let mut script = String::from("#!/bin/sh\ncase \"$1\" in\n");
        for (exe, libraries) in &self.ldd_cases {
            script.push_str(&format!("  {})\n", exe));
            for lib in libraries {
                script.push_str(&format!(
                    "    echo \"\t{} => /usr/lib/{} (0x00007f0000000000)\"\n",
                    lib, lib
                ));
            }
            script.push_str("    echo \"\tlibmissing.so.9 => not found\"\n");
            script.push_str("    ;;\n");
        }
        script.push_str("  *) echo \"\tnot a dynamic executable\" >&2; exit 1 ;;\nesac\n");

        fs::write(&self.ldd, script)?;
        fs::set_permissions(&self.ldd, fs::Permissions::from_mode(0o755))?;
        Ok(())
    }

    /// Configuration pointing every lookup at this fake host
    pub fn config(&self, upload_url: &str) -> AgentConfig {
        AgentConfig {
            transfer_id: "test-transfer".to_string(),
            upload_url: upload_url.to_string(),
            hostname_override: Some("test-host".to_string()),
            proc_root: self.proc_root.clone(),
            ldd_program: self.ldd.clone(),
            os_release_path: self.os_release.clone(),
            dry_run: false,
        }
    }

    /// Command-line arguments equivalent to [`TestEnvironment::config`]
    pub fn args(&self) -> Vec<String> {
        vec![
            "--id".to_string(),
            "test-transfer".to_string(),
            "--hostname".to_string(),
            "test-host".to_string(),
            "--proc-root".to_string(),
            self.proc_root.display().to_string(),
            "--ldd".to_string(),
            self.ldd.display().to_string(),
            "--os-release".to_string(),
            self.os_release.display().to_string(),
        ]
    }
}
