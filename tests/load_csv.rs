use chrono::NaiveDate;
use onerm_plot::chart::ChartSpec;
use onerm_plot::{Error, Progress, DEFAULT_CSV};
use std::fs;
use tempfile::TempDir;

fn write_csv(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(DEFAULT_CSV);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_and_build_series_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "Date,1RM\n2023-01-01,100\n2023-02-01,105\n2023-03-01,110\n",
    );

    let progress = Progress::from_csv(&path).unwrap();
    let series = ChartSpec::default().series(&progress);

    assert_eq!(series.len(), 3);
    let ys: Vec<f64> = series.iter().map(|(_, y)| *y).collect();
    assert_eq!(ys, vec![100., 105., 110.]);
    let xs: Vec<NaiveDate> = series.iter().map(|(x, _)| x.date_naive()).collect();
    assert_eq!(
        xs,
        vec![
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
        ]
    );
}

#[test]
fn test_exported_tracker_file() {
    // Written by the workout tracker: dates grouped in insertion order, not sorted,
    // 1RM printed with six significant digits.
    let export = "Date,1RM\n\
                  2023-05-09,155.571\n\
                  2023-05-09,226.027\n\
                  2023-05-02,150\n\
                  2023-05-16,1.55571e+06\n";
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, export);

    let progress = Progress::from_csv(&path).unwrap();
    assert_eq!(
        progress.one_rep_max,
        vec![155.571, 226.027, 150., 1_555_710.]
    );
    let days: Vec<String> = progress
        .date
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();
    assert_eq!(days, vec!["2023-05-09", "2023-05-09", "2023-05-02", "2023-05-16"]);
    assert_eq!(ChartSpec::default().series(&progress).len(), 4);
}

#[test]
fn test_exported_infinite_1rm_is_rejected() {
    // the tracker prints inf when the reps make the divisor zero
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "Date,1RM\n2023-05-09,inf\n");

    let err = Progress::from_csv(&path).unwrap_err();
    assert!(matches!(err, Error::Value { line: 2, .. }));
}

#[test]
fn test_headers_only_file_is_an_empty_chart() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "Date,1RM\n");

    let progress = Progress::from_csv(&path).unwrap();
    let spec = ChartSpec::default();
    assert!(spec.series(&progress).is_empty());
    let ranges = spec.axis_ranges(&progress).unwrap();
    assert!(spec.layout(&ranges).x_label_area > 0);
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.csv");

    match Progress::from_csv(&path) {
        Err(Error::Io { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected an io error, got {:?}", other),
    }
}

#[test]
fn test_missing_column_fails_at_load() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "Date,Weight\n2023-01-01,100\n");

    let err = Progress::from_csv(&path).unwrap_err();
    assert!(matches!(err, Error::MissingColumn("1RM")));
    assert_eq!(err.to_string(), "missing required column '1RM'");
}

#[test]
fn test_unparseable_date_fails_at_load() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "Date,1RM\nnot-a-date,100\n");

    let err = Progress::from_csv(&path).unwrap_err();
    assert_eq!(
        err.to_string(),
        "could not parse date 'not-a-date' at line 2"
    );
}

#[test]
fn test_reloading_gives_the_same_chart() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "Date,1RM\n2023-03-01,110\n2023-01-01,100\n2023-02-01,105\n",
    );

    let first = Progress::from_csv(&path).unwrap();
    let second = Progress::from_csv(&path).unwrap();
    assert_eq!(first, second);

    let spec = ChartSpec::default();
    assert_eq!(spec.series(&first), spec.series(&second));
    let (ra, rb) = (
        spec.axis_ranges(&first).unwrap(),
        spec.axis_ranges(&second).unwrap(),
    );
    assert_eq!(ra, rb);
    assert_eq!(spec.layout(&ra), spec.layout(&rb));
}
