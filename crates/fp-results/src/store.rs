//! Run storage API: one directory per run, manifest + JSONL force series.

use crate::types::{RunManifest, RunType};
use crate::{ResultsError, ResultsResult};
use fp_perturb::ForceSample;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    /// Store rooted next to a scenario file, under `.forceprobe/runs`.
    pub fn for_scenario(scenario_path: &Path) -> ResultsResult<Self> {
        let scenario_dir = scenario_path
            .parent()
            .ok_or_else(|| ResultsError::InvalidPath {
                message: "scenario path has no parent directory".to_string(),
            })?;
        let runs_dir = scenario_dir.join(".forceprobe").join("runs");
        Self::new(runs_dir)
    }

    fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root_dir.join(run_id)
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.run_dir(run_id).join("manifest.json").exists()
    }

    pub fn save_run(&self, manifest: &RunManifest, samples: &[ForceSample]) -> ResultsResult<()> {
        let run_dir = self.run_dir(&manifest.run_id);
        fs::create_dir_all(&run_dir)?;

        let manifest_json = serde_json::to_string_pretty(manifest)?;
        fs::write(run_dir.join("manifest.json"), manifest_json)?;

        let mut body = String::new();
        for sample in samples {
            body.push_str(&serde_json::to_string(sample)?);
            body.push('\n');
        }
        fs::write(run_dir.join("forces.jsonl"), body)?;

        Ok(())
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        let manifest_path = self.run_dir(run_id).join("manifest.json");

        if !manifest_path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }

        let content = fs::read_to_string(manifest_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn load_samples(&self, run_id: &str) -> ResultsResult<Vec<ForceSample>> {
        let series_path = self.run_dir(run_id).join("forces.jsonl");

        if !series_path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }

        let content = fs::read_to_string(series_path)?;
        let mut samples = Vec::new();
        for line in content.lines() {
            if !line.trim().is_empty() {
                samples.push(serde_json::from_str(line)?);
            }
        }
        Ok(samples)
    }

    pub fn list_runs(&self, scenario_id: &str) -> ResultsResult<Vec<RunManifest>> {
        let mut runs = Vec::new();

        if !self.root_dir.exists() {
            return Ok(runs);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                let run_id = entry.file_name().to_string_lossy().to_string();
                if let Ok(manifest) = self.load_manifest(&run_id)
                    && manifest.scenario_id == scenario_id
                {
                    runs.push(manifest);
                }
            }
        }

        Ok(runs)
    }

    pub fn delete_run(&self, run_id: &str) -> ResultsResult<()> {
        let run_dir = self.run_dir(run_id);
        if run_dir.exists() {
            fs::remove_dir_all(run_dir)?;
        }
        Ok(())
    }
}

/// Convenience for manifests: a human-readable one-line run description.
pub fn describe_run_type(run_type: &RunType) -> String {
    match run_type {
        RunType::Nominal => "nominal".to_string(),
        RunType::Perturbed {
            law,
            parameter,
            window_start,
            window_end,
        } => {
            let start = window_start.map_or("-inf".to_string(), |v| v.to_string());
            let end = window_end.map_or("+inf".to_string(), |v| v.to_string());
            format!("{law}({parameter}) over [{start}, {end})")
        }
    }
}
