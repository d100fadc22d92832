use std::fs;
use std::sync::Arc;

use hickory::{
    plot, AxisOptions, BackendResolver, Config, HeadlessReason, Backend, Legend, Plot,
    PlotArgs, PlotError, Scale, Table, TableOptions,
};

fn headless() -> Arc<BackendResolver> {
    // No display, no viewer.
    Arc::new(BackendResolver::from_vars([("PATH", "")]))
}

#[test]
fn test_plot_save_svg_and_png() {
    let dir = tempfile::tempdir().unwrap();
    let resolver = headless();
    let mut p = Plot::with_config(&Config::default()).with_resolver(resolver.clone());
    p.curve(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 4.0])
        .label("squares")
        .build()
        .unwrap();
    p.set(&AxisOptions::new().legend(Legend::new().loc("upper left").frame(true)))
        .unwrap();

    for name in ["p.svg", "p.PNG", "p.jpg"] {
        let path = dir.path().join(name);
        p.save(&path).unwrap();
        assert!(fs::metadata(&path).unwrap().len() > 0, "{} is empty", name);
    }
    assert!(!resolver.is_resolved());
}

#[test]
fn test_show_without_display_is_distinguishable() {
    let resolver = headless();
    let p = Plot::with_config(&Config::default()).with_resolver(resolver.clone());
    let err = p.show().unwrap_err();
    assert!(err.is_display_error());
    if cfg!(any(target_os = "macos", windows)) {
        assert!(matches!(err, PlotError::NoViewer));
    } else {
        assert!(matches!(err, PlotError::NoDisplay));
        assert_eq!(
            resolver.resolve(),
            &Backend::Headless(HeadlessReason::NoDisplay)
        );
    }
}

#[test]
fn test_table_cells_and_save() {
    let dir = tempfile::tempdir().unwrap();
    let mut table = Table::with_config(
        TableOptions::new(2, 2).share_x(true).axis(AxisOptions::new().grid(true)),
        &Config::default(),
    )
    .unwrap()
    .with_resolver(headless());

    for (i, cell) in table.iter_mut().enumerate() {
        let x: Vec<f64> = (0..10).map(|v| v as f64 + i as f64).collect();
        let y: Vec<f64> = x.iter().map(|v| v.sin()).collect();
        cell.curve(x, y).build().unwrap();
    }
    table[(1, 1)].set_yscale(Scale::Log).unwrap();
    table.get_mut((0, 0)).unwrap().hist(vec![1.0, 2.0, 2.0]).build().unwrap();

    let err = table.get((2, 0)).unwrap_err();
    assert!(matches!(err, PlotError::IndexOutOfRange { .. }));

    let path = dir.path().join("table.png");
    table.save_with_dpi(&path, 50.0).unwrap();
    assert!(fs::metadata(&path).unwrap().len() > 0);
}

#[test]
fn test_convenience_file_then_show() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.png");
    let resolver = headless();

    let err = plot(
        vec![1.0, 2.0, 3.0],
        vec![3.0, 1.0, 2.0],
        PlotArgs::new()
            .file(&path)
            .show(true)
            .resolver(resolver.clone())
            .config(Config::default()),
    )
    .unwrap_err();

    assert!(path.exists());
    assert!(resolver.is_resolved());
    assert!(err.is_display_error());
}

#[test]
fn test_function_on_log_axis() {
    let dir = tempfile::tempdir().unwrap();
    let mut p = Plot::with_options(AxisOptions::new().xscale(Scale::Log).yscale(Scale::Log))
        .unwrap()
        .with_resolver(headless());
    p.function(|x| x * x).range(0.1, 100.0).npts(50).build().unwrap();
    p.axvline(1.0).build().unwrap();

    let svg = p.render().unwrap();
    assert!(svg.contains("10⁻¹") || svg.contains("10⁰"));
    p.save(dir.path().join("f.svg")).unwrap();
}
