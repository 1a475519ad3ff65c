// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A line-based script runner for prebuilt bundles.
//!
//! Scripts never carry code. They name bundles compiled into the binary and
//! ask the runner to install them into the host's global scope:
//!
//! ```text
//! // comments start with `//` or `#`
//! install debugtool
//! log debug tool installed
//! ```

pub mod debugtool;

use std::collections::HashMap;
use std::fmt;

use sylva_core::platform::HostEnvironment;
use sylva_core::script::{ScriptError, ScriptOutput, ScriptRunner};

/// Installs a bundle into the host's global scope.
pub type BundleInstaller = Box<dyn Fn(&dyn HostEnvironment) -> anyhow::Result<()> + Send + Sync>;

/// Runs `install`/`log` scripts against a registry of bundles.
#[derive(Default)]
pub struct BundleScriptRunner {
    bundles: HashMap<String, BundleInstaller>,
}

impl BundleScriptRunner {
    /// Creates a runner that knows no bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a runner with the bundles shipped in this crate.
    pub fn with_builtin_bundles() -> Self {
        let mut runner = Self::new();
        runner.register(debugtool::BUNDLE_NAME, Box::new(debugtool::install));
        runner
    }

    /// Registers `installer` under `name`, replacing any previous bundle.
    pub fn register(&mut self, name: impl Into<String>, installer: BundleInstaller) {
        self.bundles.insert(name.into(), installer);
    }

    /// Returns `true` if a bundle named `name` is registered.
    pub fn has_bundle(&self, name: &str) -> bool {
        self.bundles.contains_key(name)
    }
}

impl fmt::Debug for BundleScriptRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.bundles.keys().collect();
        names.sort();
        f.debug_struct("BundleScriptRunner")
            .field("bundles", &names)
            .finish()
    }
}

enum Statement<'a> {
    Install(&'a str),
    Log(&'a str),
}

fn parse_line(line_no: usize, line: &str) -> Result<Option<Statement<'_>>, ScriptError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with("//") || line.starts_with('#') {
        return Ok(None);
    }

    let (keyword, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(k, r)| (k, r.trim()));
    match keyword {
        "install" if !rest.is_empty() && !rest.contains(char::is_whitespace) => {
            Ok(Some(Statement::Install(rest.trim_end_matches(';'))))
        }
        "install" => Err(ScriptError::Syntax {
            line: line_no,
            message: "`install` takes exactly one bundle name".to_string(),
        }),
        "log" => Ok(Some(Statement::Log(rest))),
        other => Err(ScriptError::Syntax {
            line: line_no,
            message: format!("unknown statement `{other}`"),
        }),
    }
}

impl ScriptRunner for BundleScriptRunner {
    fn run_script(
        &self,
        source: &str,
        host: &dyn HostEnvironment,
    ) -> Result<ScriptOutput, ScriptError> {
        // A script with a syntax error runs nothing.
        let mut statements = Vec::new();
        for (idx, line) in source.lines().enumerate() {
            if let Some(statement) = parse_line(idx + 1, line)? {
                statements.push((idx + 1, statement));
            }
        }

        for (line, statement) in &statements {
            match statement {
                Statement::Install(name) => {
                    let installer =
                        self.bundles
                            .get(*name)
                            .ok_or_else(|| ScriptError::UnknownBundle {
                                line: *line,
                                name: name.to_string(),
                            })?;
                    installer(host).map_err(|source| ScriptError::Bundle {
                        name: name.to_string(),
                        source,
                    })?;
                    log::info!("Installed bundle '{name}'.");
                }
                Statement::Log(text) => log::info!("[script] {text}"),
            }
        }

        Ok(ScriptOutput {
            executed: statements.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessHost;
    use sylva_core::script::lookup_debug_panel;

    #[test]
    fn installs_builtin_debug_tool() {
        let host = HeadlessHost::default();
        let runner = BundleScriptRunner::with_builtin_bundles();

        let output = runner
            .run_script("// tool\ninstall debugtool\nlog ready\n", &host)
            .unwrap();

        assert_eq!(output.executed, 2);
        assert!(lookup_debug_panel(&host).is_some());
    }

    #[test]
    fn syntax_errors_stop_before_running_anything() {
        let host = HeadlessHost::default();
        let runner = BundleScriptRunner::with_builtin_bundles();

        let err = runner
            .run_script("install debugtool\nalert('hi')\n", &host)
            .unwrap_err();

        assert!(matches!(err, ScriptError::Syntax { line: 2, .. }));
        assert!(lookup_debug_panel(&host).is_none());
    }

    #[test]
    fn unknown_bundles_are_reported() {
        let host = HeadlessHost::default();
        let err = BundleScriptRunner::new()
            .run_script("install physics", &host)
            .unwrap_err();
        assert!(matches!(err, ScriptError::UnknownBundle { line: 1, ref name } if name == "physics"));
    }

    #[test]
    fn failing_bundle_is_wrapped() {
        let host = HeadlessHost::default();
        let mut runner = BundleScriptRunner::new();
        runner.register(
            "broken",
            Box::new(|_: &dyn HostEnvironment| -> anyhow::Result<()> {
                Err(anyhow::anyhow!("no gpu"))
            }),
        );

        let err = runner.run_script("install broken", &host).unwrap_err();
        assert!(matches!(err, ScriptError::Bundle { ref name, .. } if name == "broken"));
    }
}
