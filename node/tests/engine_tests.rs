use pixelcrush_kernel::{Canvas, Digest, KernelError, Rgb};
use pixelcrush_node::config::{NodeConfig, DEFAULT_ADMIN_DIGEST};
use pixelcrush_node::engine::Engine;
use pixelcrush_node::errors::EngineError;
use tempfile::tempdir;

#[test]
fn test_open_from_snapshot_file() {
    let dir = tempdir().unwrap();
    let source = Canvas::<8, 2>::blank();
    source.overwrite(7, 1, Rgb::new(1, 2, 3)).unwrap();
    let path = dir.path().join("place.data");
    std::fs::write(&path, source.snapshot()).unwrap();

    let mut cfg = NodeConfig::default();
    cfg.snapshot_path = path;
    let engine = Engine::<8, 2>::open(&cfg).unwrap();
    assert_eq!(engine.canvas().color_at(7, 1), Some(Rgb::new(1, 2, 3)));
}

#[test]
fn test_open_rejects_wrong_size() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("place.data");
    std::fs::write(&path, vec![0u8; 100]).unwrap();

    let mut cfg = NodeConfig::default();
    cfg.snapshot_path = path;
    match Engine::<8, 2>::open(&cfg) {
        Err(EngineError::Kernel(KernelError::Format { expected: 560, found: 100 })) => {}
        Err(e) => panic!("unexpected error {:?}", e),
        Ok(_) => panic!("loaded a truncated snapshot"),
    }
}

#[test]
fn test_open_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let mut cfg = NodeConfig::default();
    cfg.snapshot_path = dir.path().join("missing.data");
    assert!(matches!(Engine::<2, 2>::open(&cfg), Err(EngineError::Io(_))));
}

#[test]
fn test_save_failure_leaves_canvas_alone() {
    let dir = tempdir().unwrap();
    let mut cfg = NodeConfig::default();
    cfg.save_dir = dir.path().join("missing");
    let engine = Engine::<2, 2>::new(&cfg, Canvas::blank());
    engine.canvas().overwrite(0, 0, Rgb::new(3, 3, 3)).unwrap();
    let before = engine.canvas().snapshot();

    assert!(matches!(engine.save_snapshot(), Err(EngineError::Io(_))));
    assert_eq!(engine.canvas().snapshot(), before);
}

#[test]
fn test_default_admin_digest() {
    let cfg = NodeConfig::default();
    let engine = Engine::<1, 1>::new(&cfg, Canvas::blank());
    assert_eq!(cfg.admin_digest, Digest(DEFAULT_ADMIN_DIGEST));
    assert!(!engine.is_admin(""));
    assert!(!engine.is_admin("guess"));
}

#[test]
fn test_config_from_lookup() {
    let cfg = NodeConfig::from_lookup(|key| match key {
        "PIXELCRUSH_BIND" => Some("0.0.0.0:8080".to_string()),
        "PIXELCRUSH_ADMIN_DIGEST" => Some("00".repeat(32)),
        "PIXELCRUSH_WARM_CACHE" => Some("false".to_string()),
        _ => None,
    })
    .unwrap();
    assert_eq!(cfg.bind_addr.port(), 8080);
    assert_eq!(cfg.admin_digest, Digest::ZERO);
    assert!(!cfg.warm_cache);

    assert!(NodeConfig::from_lookup(|key| (key == "PIXELCRUSH_BIND").then(|| "nope".to_string())).is_err());
    assert!(NodeConfig::from_lookup(|key| (key == "PIXELCRUSH_ADMIN_DIGEST").then(|| "abc".to_string())).is_err());
}
