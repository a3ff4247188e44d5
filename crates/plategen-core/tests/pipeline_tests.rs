//! End-to-end tests for the generation pipeline with in-memory adapters.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use plategen_core::application::ApplicationError;
use plategen_core::prelude::*;

const SOURCE: &str = r#"include <plate_base.scad>
plate_base();
translate([<x_pCode>, <y_pCode>, <z_pCodeNum>]) text("<plateCode>", size = <plateCodeSize>);
translate([<x_pNum>, <y_pNum>, <z_pCodeNum>]) text("<plateNum>", size = <plateNumSize>);
"#;

// ── Test doubles ──────────────────────────────────────────────────────────────

#[derive(Default)]
struct MemFs {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl MemFs {
    fn read(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.lock().unwrap().get(path.as_ref()).cloned()
    }

    fn paths(&self) -> Vec<PathBuf> {
        self.files.lock().unwrap().keys().cloned().collect()
    }
}

#[derive(Clone, Default)]
struct SharedFs(Arc<MemFs>);

impl Filesystem for SharedFs {
    fn create_dir_all(&self, _path: &Path) -> PlateResult<()> {
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> PlateResult<()> {
        self.0
            .files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> PlateResult<()> {
        self.0.files.lock().unwrap().remove(path);
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> PlateResult<()> {
        let mut files = self.0.files.lock().unwrap();
        let content = files
            .remove(from)
            .ok_or_else(|| ApplicationError::FilesystemError {
                path: from.to_path_buf(),
                reason: "not found".into(),
            })?;
        files.insert(to.to_path_buf(), content);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.0.files.lock().unwrap().contains_key(path)
    }
}

#[derive(Clone, Copy)]
enum Behaviour {
    Succeed,
    Fail,
    Hang,
    Silent,
}

/// Pretends to be the compiler: the "model" is the script text itself.
struct FakeCompiler {
    fs: SharedFs,
    behaviour: Behaviour,
    calls: Arc<AtomicUsize>,
    inputs: Arc<Mutex<Vec<PathBuf>>>,
}

impl GeometryCompiler for FakeCompiler {
    fn compile(&self, input: &Path, output: &Path, _timeout: Duration) -> PlateResult<CompileOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inputs.lock().unwrap().push(input.to_path_buf());

        let status = match self.behaviour {
            Behaviour::Succeed => {
                let script = self.fs.0.read(input).unwrap_or_default();
                self.fs.write_file(output, &format!("solid plate\n{script}"))?;
                CompileStatus::Success
            }
            Behaviour::Fail => {
                self.fs.write_file(output, "solid partial")?;
                CompileStatus::Failed { code: Some(1) }
            }
            Behaviour::Hang => CompileStatus::TimedOut,
            Behaviour::Silent => CompileStatus::Success,
        };
        Ok(CompileOutcome {
            status,
            diagnostics: String::new(),
        })
    }

    fn probe(&self) -> PlateResult<String> {
        Ok("FakeSCAD version 0".into())
    }
}

struct StaticScripts;

impl ScriptStore for StaticScripts {
    fn load(&self, _reference: &str) -> PlateResult<Arc<str>> {
        Ok(Arc::from(SOURCE))
    }

    fn contains(&self, _reference: &str) -> bool {
        true
    }
}

struct Harness {
    service: GenerationService,
    fs: SharedFs,
    calls: Arc<AtomicUsize>,
    inputs: Arc<Mutex<Vec<PathBuf>>>,
}

fn harness(behaviour: Behaviour) -> Harness {
    let fs = SharedFs::default();
    let calls = Arc::new(AtomicUsize::new(0));
    let inputs = Arc::new(Mutex::new(Vec::new()));
    let compiler = FakeCompiler {
        fs: fs.clone(),
        behaviour,
        calls: Arc::clone(&calls),
        inputs: Arc::clone(&inputs),
    };
    let settings = RenderSettings {
        scratch_dir: PathBuf::from("/scratch"),
        output_dir: PathBuf::from("/generated_files"),
        timeout: Duration::from_secs(30),
        format: ArtifactFormat::Stl,
    };
    let invoker = RenderInvoker::new(Box::new(compiler), Box::new(fs.clone()), settings);
    let service = GenerationService::try_new(Box::new(StaticScripts), invoker).unwrap();
    Harness {
        service,
        fs,
        calls,
        inputs,
    }
}

impl Harness {
    /// Nothing but published artifacts may remain.
    fn assert_no_scratch_left(&self) {
        for path in self.fs.0.paths() {
            assert!(!path.starts_with("/scratch"), "scratch left: {}", path.display());
            assert!(
                !path.to_string_lossy().contains(".partial."),
                "staging left: {}",
                path.display()
            );
        }
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[test]
fn single_letter_code_on_dubai_new() {
    let h = harness(Behaviour::Succeed);

    let artifact = h
        .service
        .generate(&RawPlateRequest::new("dubai_new", "A", "12345"))
        .unwrap();

    assert_eq!(artifact.output_file_name.as_str(), "A-12345.stl");
    assert_eq!(artifact.output_path, PathBuf::from("/generated_files/A-12345.stl"));

    let model = h.fs.0.read(&artifact.output_path).unwrap();
    assert!(model.contains("translate([15, 10, 2.95]) text(\"A\", size = 12)"));
    assert!(model.contains("translate([46.5, 10, 2.95]) text(\"12345\", size = 12)"));
    assert!(model.contains("include <plate_base.scad>"));
    h.assert_no_scratch_left();
}

#[test]
fn two_letter_code_on_dubai_new() {
    let h = harness(Behaviour::Succeed);

    let artifact = h
        .service
        .generate(&RawPlateRequest::new("dubai_new", "AB", "12345"))
        .unwrap();

    assert_eq!(artifact.output_file_name.as_str(), "AB-12345.stl");
    let model = h.fs.0.read(&artifact.output_path).unwrap();
    assert!(model.contains("translate([16, 10, 2.95]) text(\"AB\", size = 7)"));
}

#[test]
fn lowercase_codes_are_normalized() {
    let h = harness(Behaviour::Succeed);

    let artifact = h
        .service
        .generate(&RawPlateRequest::new("dubai_new_sm", "xy", "7"))
        .unwrap();

    assert_eq!(artifact.output_file_name.as_str(), "XY-7.stl");
    let model = h.fs.0.read(&artifact.output_path).unwrap();
    assert!(model.contains("translate([29.8, 5.4, 2.95]) text(\"XY\", size = 5.2)"));
}

#[test]
fn invalid_input_never_invokes_the_compiler() {
    let h = harness(Behaviour::Succeed);

    let cases = [
        RawPlateRequest::new("dubai_new", "A", "12a"),
        RawPlateRequest::new("unknown_tpl", "A", "1"),
        RawPlateRequest::new("sharjah_old", "A", "1"),
        RawPlateRequest::new("dubai_new", "ABC", "1"),
        RawPlateRequest::new("dubai_new", "A", "123456"),
    ];
    for raw in &cases {
        let response = h.service.handle(raw);
        assert!(
            matches!(
                response,
                GenerationResponse::Error {
                    kind: ErrorKind::ValidationError,
                    ..
                }
            ),
            "{raw:?} -> {response:?}"
        );
    }

    assert_eq!(h.calls.load(Ordering::SeqCst), 0);
    assert!(h.fs.0.paths().is_empty());
}

#[test]
fn failed_render_publishes_nothing() {
    let h = harness(Behaviour::Fail);

    let err = h
        .service
        .generate(&RawPlateRequest::new("dubai_new", "A", "1"))
        .unwrap_err();

    assert!(matches!(
        err,
        PlateError::Application(ApplicationError::RenderFailed { .. })
    ));
    assert!(!h.fs.0.paths().iter().any(|p| p.ends_with("A-1.stl")));
    h.assert_no_scratch_left();
}

#[test]
fn timed_out_render_is_reported_and_cleaned() {
    let h = harness(Behaviour::Hang);

    let response = h.service.handle(&RawPlateRequest::new("dubai_old", "Q", "55"));

    assert_eq!(
        response,
        GenerationResponse::Error {
            kind: ErrorKind::RenderError,
            message: "Model generation timed out, please try again".into(),
        }
    );
    h.assert_no_scratch_left();
}

#[test]
fn silent_success_is_incomplete() {
    let h = harness(Behaviour::Silent);

    let err = h
        .service
        .generate(&RawPlateRequest::new("sharjah_old", "3", "42"))
        .unwrap_err();

    assert!(matches!(
        err,
        PlateError::Application(ApplicationError::RenderIncomplete)
    ));
    assert!(h.fs.0.paths().is_empty());
}

#[test]
fn same_plate_twice_overwrites() {
    let h = harness(Behaviour::Succeed);
    let raw = RawPlateRequest::new("dubai_new", "A", "1");

    let first = h.service.generate(&raw).unwrap();
    let second = h.service.generate(&raw).unwrap();

    assert_eq!(first.output_path, second.output_path);
    assert_eq!(h.fs.0.paths().len(), 1);
    assert_eq!(h.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn concurrent_requests_stay_isolated() {
    let h = harness(Behaviour::Succeed);
    let codes = ["A", "B", "C", "D", "EF", "GH", "IJ", "KL"];

    let artifacts: Vec<GenerationArtifact> = std::thread::scope(|scope| {
        let handles: Vec<_> = codes
            .into_iter()
            .enumerate()
            .map(|(i, code)| {
                let service = &h.service;
                scope.spawn(move || {
                    let number = (10_000 + i).to_string();
                    service
                        .generate(&RawPlateRequest::new("dubai_new", code, &number))
                        .unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    for (i, (artifact, code)) in artifacts.iter().zip(codes).enumerate() {
        let number = (10_000 + i).to_string();
        assert_eq!(artifact.output_file_name.as_str(), format!("{code}-{number}.stl"));

        let model = h.fs.0.read(&artifact.output_path).unwrap();
        assert!(model.contains(&format!("text(\"{code}\"")));
        assert!(model.contains(&format!("text(\"{number}\"")));
    }

    let mut inputs = h.inputs.lock().unwrap().clone();
    inputs.sort();
    inputs.dedup();
    assert_eq!(inputs.len(), codes.len(), "scratch files were shared");
    h.assert_no_scratch_left();
}

#[test]
fn every_template_passes_the_composition_check() {
    let h = harness(Behaviour::Succeed);

    for check in h.service.check_templates() {
        assert!(check.result.is_ok(), "{}: {:?}", check.template, check.result);
    }
    assert_eq!(h.calls.load(Ordering::SeqCst), 0);
}
