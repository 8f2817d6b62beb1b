/*! FreeLing engine.

Drives the FreeLing `analyze` executable: raw text goes on stdin, the `tagged`
output level is read back from stdout and parsed by [parse_tagged].
!*/
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::analysis::AnnotatedDocument;
use crate::error::Error;

use super::{parse_tagged, Analyze};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Configured FreeLing analyzer. Use [FreelingBuilder] to build one.
#[derive(Debug, Clone)]
pub struct Freeling {
    bin: PathBuf,
    resources: PathBuf,
    config_file: PathBuf,
    timeout: Option<Duration>,
}

impl Freeling {
    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.bin);
        cmd.arg("-f")
            .arg(&self.config_file)
            .args(["--outlv", "tagged", "--nec"])
            .env("FREELINGSHARE", &self.resources)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    /// Wait for the child to exit, killing it if the deadline passes.
    fn wait(&self, child: &mut Child) -> Result<ExitStatus, Error> {
        let timeout = match self.timeout {
            Some(t) => t,
            None => return Ok(child.wait()?),
        };

        let deadline = Instant::now() + timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                if let Err(e) = child.kill() {
                    warn!("could not kill analyzer process {}: {}", child.id(), e);
                }
                child.wait()?;
                return Err(Error::Timeout(timeout));
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    /// Run the executable on `text` and return its standard output.
    fn run(&self, text: &str) -> Result<String, Error> {
        let mut child = self
            .command()
            .spawn()
            .map_err(|e| Error::Engine(format!("could not start {:?}: {}", self.bin, e)))?;

        // stdin is fed and the outputs are drained from separate threads so that
        // a large text can't fill a pipe and deadlock the child.
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Engine("no stdin on analyzer process".to_string()))?;
        let input = text.to_string();
        let writer = thread::spawn(move || {
            if let Err(e) = stdin.write_all(input.as_bytes()) {
                debug!("analyzer closed its input early: {}", e);
            }
        });

        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::Engine("no stdout on analyzer process".to_string()))?;
        let reader = thread::spawn(move || {
            let mut buf = Vec::new();
            stdout.read_to_end(&mut buf).map(|_| buf)
        });

        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| Error::Engine("no stderr on analyzer process".to_string()))?;
        let err_reader = thread::spawn(move || {
            let mut buf = String::new();
            // stderr is only used for diagnostics
            let _ = stderr.read_to_string(&mut buf);
            buf
        });

        let status = self.wait(&mut child);

        let _ = writer.join();
        let output = reader
            .join()
            .map_err(|_| Error::Engine("analyzer output reader panicked".to_string()))?;
        let diagnostics = err_reader.join().unwrap_or_default();

        let status = status?;
        if !status.success() {
            return Err(Error::Engine(format!(
                "analyzer exited with {}: {}",
                status,
                diagnostics.trim()
            )));
        }

        String::from_utf8(output?)
            .map_err(|e| Error::Engine(format!("analyzer output is not valid UTF-8: {}", e)))
    }
}

impl Analyze for Freeling {
    fn analyze(&self, text: &str) -> Result<AnnotatedDocument, Error> {
        let output = self.run(text)?;
        Ok(parse_tagged(&output))
    }
}

/// Builder for [Freeling].
///
/// Defaults are the ones of a stock FreeLing install:
/// - bin: `analyze` (looked up in `PATH`)
/// - resources: `/usr/share/freeling/`
/// - lang: `es`
/// - no timeout
pub struct FreelingBuilder {
    bin: PathBuf,
    resources: PathBuf,
    lang: String,
    timeout: Option<Duration>,
}

impl FreelingBuilder {
    pub fn bin<'b>(&'b mut self, bin: &Path) -> &'b mut FreelingBuilder {
        self.bin = bin.to_path_buf();
        self
    }

    pub fn resources<'b>(&'b mut self, resources: &Path) -> &'b mut FreelingBuilder {
        self.resources = resources.to_path_buf();
        self
    }

    pub fn lang<'b>(&'b mut self, lang: &str) -> &'b mut FreelingBuilder {
        self.lang = lang.to_string();
        self
    }

    pub fn timeout<'b>(&'b mut self, timeout: Option<Duration>) -> &'b mut FreelingBuilder {
        self.timeout = timeout;
        self
    }

    /// Check that the resource tree holds data for the configured language and build the engine.
    pub fn build(&self) -> Result<Freeling, Error> {
        if !self.resources.is_dir() {
            return Err(Error::Config(format!(
                "FreeLing resource root {:?} is not a directory",
                self.resources
            )));
        }

        let lang_dir = self.resources.join(&self.lang);
        if !lang_dir.is_dir() {
            return Err(Error::Config(format!(
                "no FreeLing data for language {:?} (expected {:?})",
                self.lang, lang_dir
            )));
        }

        let config_file = self
            .resources
            .join("config")
            .join(format!("{}.cfg", self.lang));
        if !config_file.is_file() {
            return Err(Error::Config(format!(
                "missing FreeLing configuration file {:?}",
                config_file
            )));
        }

        debug!("using FreeLing config {:?}", config_file);
        Ok(Freeling {
            bin: self.bin.clone(),
            resources: self.resources.clone(),
            config_file,
            timeout: self.timeout,
        })
    }
}

impl Default for FreelingBuilder {
    fn default() -> Self {
        Self {
            bin: PathBuf::from("analyze"),
            resources: PathBuf::from("/usr/share/freeling/"),
            lang: "es".to_string(),
            timeout: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::time::Duration;

    use super::FreelingBuilder;
    use crate::engine::Analyze;
    use crate::error::Error;

    fn resources(root: &Path, lang: &str) {
        std::fs::create_dir_all(root.join(lang)).unwrap();
        std::fs::create_dir_all(root.join("config")).unwrap();
        std::fs::write(root.join("config").join(format!("{lang}.cfg")), "").unwrap();
    }

    #[test]
    fn missing_resources() {
        let root = tempfile::tempdir().unwrap();
        let missing = root.path().join("nope");

        let r = FreelingBuilder::default().resources(&missing).build();
        assert!(matches!(r, Err(Error::Config(_))));
    }

    #[test]
    fn missing_language() {
        let root = tempfile::tempdir().unwrap();
        resources(root.path(), "es");

        let r = FreelingBuilder::default()
            .resources(root.path())
            .lang("ca")
            .build();
        assert!(matches!(r, Err(Error::Config(_))));
    }

    #[test]
    fn missing_config_file() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("es")).unwrap();

        let r = FreelingBuilder::default().resources(root.path()).build();
        assert!(matches!(r, Err(Error::Config(_))));
    }

    #[test]
    fn valid_resources() {
        let root = tempfile::tempdir().unwrap();
        resources(root.path(), "es");

        let engine = FreelingBuilder::default()
            .resources(root.path())
            .build()
            .unwrap();
        assert!(engine.config_file.ends_with("config/es.cfg"));
    }

    #[test]
    fn missing_binary() {
        let root = tempfile::tempdir().unwrap();
        resources(root.path(), "es");

        let engine = FreelingBuilder::default()
            .resources(root.path())
            .bin(&root.path().join("no-such-analyzer"))
            .build()
            .unwrap();
        assert!(matches!(engine.analyze("hola"), Err(Error::Engine(_))));
    }

    // Both scripts live in one test so that no other test forks while one is being written.
    #[cfg(unix)]
    #[test]
    fn scripted_analyzer() {
        use std::os::unix::fs::PermissionsExt;

        let root = tempfile::tempdir().unwrap();
        resources(root.path(), "es");

        let script = |name: &str, body: &str| {
            let path = root.path().join(name);
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        };

        let echo = script(
            "echo-analyze",
            "cat > /dev/null\nprintf 'Pedro pedro NP00SP0 1\\ncorrió correr VMIS3S0 1\\n\\n'",
        );
        let engine = FreelingBuilder::default()
            .resources(root.path())
            .bin(&echo)
            .timeout(Some(Duration::from_secs(30)))
            .build()
            .unwrap();
        let doc = engine.analyze("Pedro corrió").unwrap();
        let lemmas: Vec<&str> = doc.tokens().map(|t| t.lemma()).collect();
        assert_eq!(lemmas, vec!["pedro", "correr"]);

        let slow = script("slow-analyze", "exec sleep 10");
        let engine = FreelingBuilder::default()
            .resources(root.path())
            .bin(&slow)
            .timeout(Some(Duration::from_millis(200)))
            .build()
            .unwrap();
        assert!(matches!(engine.analyze("hola"), Err(Error::Timeout(_))));

        let failing = script("failing-analyze", "echo boom >&2\nexit 3");
        let engine = FreelingBuilder::default()
            .resources(root.path())
            .bin(&failing)
            .build()
            .unwrap();
        assert!(matches!(engine.analyze("hola"), Err(Error::Engine(_))));
    }
}
