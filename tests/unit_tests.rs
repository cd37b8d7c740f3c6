//! Unit tests for the building blocks of labeled time series
//!
//! These cover labels, the axis registry, the time axis, canonicalization,
//! construction, statistics operations and parallel configuration.

use labeled_timeseries::{
    canonicalize,
    dimensions::Dimensions,
    errors::{ErrorKind, Result, TimeSeriesError},
    flavor::{Flavor, NamedLabels, SensorKind},
    get_parallel_info, labels, BipolarPairing, ContactPairing, Label, LabeledArray,
    ParallelConfig, RangeSpec, SeriesDefaults, Selector, StatOperation, TimeAxis,
};
use ndarray::{arr1, Array1, Array2, Array3, Array4, ArrayD, IxDyn};

fn kind_of<T: std::fmt::Debug>(result: Result<T>) -> ErrorKind {
    result.expect_err("operation should fail").kind()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_error_types() {
    let err = TimeSeriesError::LabelNotFound {
        axis: "Space".to_string(),
        label: "'r9'".to_string(),
        available: vec!["'r1'".to_string(), "'r2'".to_string()],
    };
    let message = format!("{err}");
    assert!(message.contains("Label 'r9' not found on axis 'Space'"));
    assert!(message.contains("'r1'"));
    assert_eq!(err.kind(), ErrorKind::Lookup);

    let err = TimeSeriesError::validation("bad shape");
    assert_eq!(format!("{err}"), "Validation error: bad shape");
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = TimeSeriesError::MissingLabels {
        axis: "Mode".to_string(),
        shape: [3, 1, 3, 1],
    };
    assert!(format!("{err}").contains("no labels defined for axis 'Mode'"));
    assert_eq!(err.kind(), ErrorKind::MissingLabels);

    assert_eq!(
        TimeSeriesError::AxisOutOfRange { index: 7 }.kind(),
        ErrorKind::OutOfRange
    );
}

#[test]
fn test_label_matching() {
    assert_eq!(Label::from("r1"), Label::Str("r1".to_string()));
    assert_ne!(Label::from("r1"), Label::from("r2"));
    assert!(Label::Float(0.01).matches(&Label::Float(0.010_000_000_1)));
    assert!(Label::Int(2).matches(&Label::Float(2.0)));
    // equality stays exact, tolerance only applies to lookup
    assert_ne!(Label::Float(0.01), Label::Float(0.010_000_000_1));
    assert_ne!(Label::Int(2), Label::Float(2.0));
    assert_eq!(Label::Float(0.25), Label::Float(0.25));
    assert!(!Label::Str("1".to_string()).matches(&Label::Int(1)));

    assert!(Label::from(3usize).is_index());
    assert!(!Label::from(0.5).is_index());
    assert_eq!(Label::from("r1").to_string(), "'r1'");
    assert_eq!(Label::Int(4).to_string(), "4");

    let tokens = labels(["a", "b"]);
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[1].as_str(), Some("b"));
}

#[test]
fn test_canonicalization() -> Result<()> {
    let cases: [(&[usize], [usize; 4]); 4] = [
        (&[5], [5, 1, 1, 1]),
        (&[5, 2], [5, 2, 1, 1]),
        (&[5, 2, 3], [5, 2, 3, 1]),
        (&[5, 2, 3, 4], [5, 2, 3, 4]),
    ];
    for (shape, expected) in cases {
        let data = canonicalize(ArrayD::zeros(IxDyn(shape)))?;
        assert_eq!(data.shape(), &expected);
    }

    let rank0 = canonicalize(ArrayD::zeros(IxDyn(&[])));
    assert_eq!(kind_of(rank0), ErrorKind::Validation);
    let rank5 = canonicalize(ArrayD::zeros(IxDyn(&[1, 1, 1, 1, 1])));
    assert_eq!(kind_of(rank5), ErrorKind::Validation);

    let series = LabeledArray::new(Array1::from(vec![1.0, 2.0, 3.0]))?;
    assert_eq!(series.shape(), [3, 1, 1, 1]);
    let series = LabeledArray::new(Array2::<f64>::zeros((4, 2)))?;
    assert_eq!(series.shape(), [4, 2, 1, 1]);
    let series = LabeledArray::new(Array3::<f64>::zeros((4, 2, 3)))?;
    assert_eq!(series.shape(), [4, 2, 3, 1]);
    Ok(())
}

#[test]
fn test_zero_extent_rejected() {
    let result = LabeledArray::new(Array4::<f64>::zeros((0, 1, 1, 1)));
    assert_eq!(kind_of(result), ErrorKind::Validation);

    let result = LabeledArray::new(Array4::<f64>::zeros((2, 1, 0, 1)));
    assert_eq!(kind_of(result), ErrorKind::Validation);
}

#[test]
fn test_default_construction() -> Result<()> {
    let series = LabeledArray::new(Array4::<f64>::zeros((3, 2, 4, 1)))?;
    assert_eq!(
        series.axis_names(),
        &["Time", "State Variable", "Space", "Mode"].map(String::from)
    );
    assert_eq!(series.title(), "Time Series");
    assert_eq!(series.sample_period_unit(), "ms");
    assert!(approx(series.start_time(), 0.0));
    assert!(approx(series.sample_period(), 1.0));
    assert_eq!(series.time(), &[0.0, 1.0, 2.0]);
    assert!(series.labels_dimensions().is_empty());
    assert!(series.space_labels().is_empty());
    assert_eq!(series.size(), 24);
    assert_eq!(series.number_of_variables(), 2);
    assert_eq!(series.number_of_labels(), 4);
    assert_eq!(series.number_of_samples(), 1);

    let defaults = SeriesDefaults::new("Run", 5.0, 0.5, "s");
    let series = LabeledArray::builder(Array1::<f64>::zeros(4))
        .defaults(defaults)
        .build()?;
    assert_eq!(series.title(), "Run");
    assert!(approx(series.start_time(), 5.0));
    assert!(approx(series.end_time(), 6.5));
    assert!(approx(series.sample_rate(), 2.0));
    assert_eq!(series.sample_period_unit(), "s");

    let series = LabeledArray::builder(Array1::<f64>::zeros(2))
        .defaults(SeriesDefaults::default().with_title("Baseline"))
        .build()?;
    assert_eq!(series.title(), "Baseline");
    assert_eq!(series.sample_period_unit(), "ms");
    assert!(approx(series.sample_period(), 1.0));

    // explicit metadata wins over the defaults
    let series = LabeledArray::builder(Array1::<f64>::zeros(2))
        .defaults(SeriesDefaults::new("Run", 5.0, 0.5, "s"))
        .sample_period(0.25)
        .title("Override")
        .build()?;
    assert_eq!(series.title(), "Override");
    assert!(approx(series.sample_period(), 0.25));
    assert!(approx(series.start_time(), 5.0));
    Ok(())
}

#[test]
fn test_axis_registry() -> Result<()> {
    let series = LabeledArray::builder(Array4::<f64>::zeros((3, 1, 3, 1)))
        .labels("Space", labels(["r1", "r2", "r3"]))
        .build()?;

    assert_eq!(series.axis_index("Space")?, 2);
    assert_eq!(series.axis_index(1usize)?, 1);
    assert_eq!(series.axis_name(3)?, "Mode");
    assert_eq!(kind_of(series.axis_name(4)), ErrorKind::OutOfRange);

    assert_eq!(kind_of(series.axis_index(4usize)), ErrorKind::OutOfRange);
    assert_eq!(kind_of(series.axis_index(-1i64)), ErrorKind::OutOfRange);
    assert_eq!(kind_of(series.axis_index(&Label::Float(1.5))), ErrorKind::Type);
    assert_eq!(kind_of(series.axis_index("Nope")), ErrorKind::Name);

    match series.axis_index("Nope") {
        Err(TimeSeriesError::AxisNotFound { name, available }) => {
            assert_eq!(name, "Nope");
            assert_eq!(available.len(), 4);
        }
        other => panic!("unexpected result {other:?}"),
    }

    assert_eq!(series.axis_labels("Space")?, labels(["r1", "r2", "r3"]).as_slice());
    assert_eq!(kind_of(series.axis_labels("Mode")), ErrorKind::MissingLabels);
    assert_eq!(
        series.axis_labels_or_positions("Mode")?,
        vec![Label::Int(0)]
    );
    Ok(())
}

#[test]
fn test_rename_axes() -> Result<()> {
    let mut series = LabeledArray::builder(Array4::<f64>::zeros((3, 1, 3, 1)))
        .labels("Space", labels(["r1", "r2", "r3"]))
        .build()?;

    series.rename_axes(&["Region"], Some(&[2]))?;
    assert_eq!(series.axis_names()[2], "Region");
    assert_eq!(series.axis_labels("Region")?.len(), 3);
    assert!(series.labels_dimensions().contains_key("Region"));
    assert!(!series.labels_dimensions().contains_key("Space"));

    series.rename_axes(&["t", "sv"], None)?;
    assert_eq!(series.axis_names()[0], "t");
    assert_eq!(series.axis_names()[1], "sv");

    let duplicated = series.rename_axes(&["Region"], Some(&[0]));
    assert_eq!(kind_of(duplicated), ErrorKind::Validation);
    assert_eq!(series.axis_names()[0], "t");

    let mismatched = series.rename_axes(&["a", "b"], Some(&[0]));
    assert_eq!(kind_of(mismatched), ErrorKind::Validation);
    let out_of_range = series.rename_axes(&["a"], Some(&[4]));
    assert_eq!(kind_of(out_of_range), ErrorKind::OutOfRange);
    Ok(())
}

#[test]
fn test_construction_validation() {
    let duplicate_names = LabeledArray::builder(Array4::<f64>::zeros((3, 1, 3, 1)))
        .names(["Time", "Time", "Space", "Mode"])
        .build();
    assert_eq!(kind_of(duplicate_names), ErrorKind::Validation);

    let short_labels = LabeledArray::builder(Array4::<f64>::zeros((3, 1, 3, 1)))
        .labels("Space", labels(["r1", "r2"]))
        .build();
    match short_labels {
        Err(TimeSeriesError::Validation { message }) => assert!(message.contains("Space")),
        other => panic!("unexpected result {other:?}"),
    }

    let unknown_axis = LabeledArray::builder(Array4::<f64>::zeros((3, 1, 3, 1)))
        .labels("Region", labels(["r1", "r2", "r3"]))
        .build();
    assert_eq!(kind_of(unknown_axis), ErrorKind::Name);

    assert!(Dimensions::new(["a", "b", "c", "a"].map(String::from)).is_err());
}

#[test]
fn test_time_axis() -> Result<()> {
    let time = TimeAxis::from_period(0.0, 0.01, 3, "ms");
    assert_eq!(time.len(), 3);
    assert!(approx(time.time()[2], 0.02));
    assert!(approx(time.end_time(), 0.02));
    assert!(approx(time.duration(), 0.02));
    assert!(approx(time.sample_rate(), 100_000.0));
    assert!(approx(time.time_for_index(1), 0.01));
    assert_eq!(time.index_for_time(0.03), 3);
    assert_eq!(time.index_for_time(0.025), 2);
    time.validate(3, "Time")?;
    assert_eq!(kind_of(time.validate(4, "Time")), ErrorKind::Validation);

    let time = TimeAxis::from_vector(vec![1.0, 3.0, 5.0], 1.0, "s")?;
    assert!(approx(time.start_time(), 1.0));
    assert!(approx(time.sample_period(), 2.0));
    assert!(approx(time.sample_rate(), 0.5));

    let single = TimeAxis::from_vector(vec![4.0], 0.25, "ms")?;
    assert!(approx(single.sample_period(), 0.25));

    let empty = TimeAxis::from_vector(Vec::new(), 1.0, "ms");
    assert_eq!(kind_of(empty), ErrorKind::Validation);
    Ok(())
}

#[test]
fn test_inconsistent_time_rejected() -> Result<()> {
    let start_mismatch = LabeledArray::builder(Array1::<f64>::zeros(3))
        .time(vec![0.0, 1.0, 2.0])
        .start_time(0.5)
        .build();
    assert_eq!(kind_of(start_mismatch), ErrorKind::Validation);

    let period_mismatch = LabeledArray::builder(Array1::<f64>::zeros(3))
        .time(vec![0.0, 1.0, 2.0])
        .sample_period(0.5)
        .build();
    assert_eq!(kind_of(period_mismatch), ErrorKind::Validation);

    let short_time = LabeledArray::builder(Array1::<f64>::zeros(3))
        .time(vec![0.0, 1.0])
        .build();
    assert_eq!(kind_of(short_time), ErrorKind::Validation);

    let negative_period = LabeledArray::builder(Array1::<f64>::zeros(3))
        .sample_period(-1.0)
        .build();
    assert_eq!(kind_of(negative_period), ErrorKind::Validation);

    let series = LabeledArray::builder(Array1::<f64>::zeros(3))
        .time(vec![2.0, 2.5, 3.0])
        .build()?;
    assert!(approx(series.start_time(), 2.0));
    assert!(approx(series.sample_period(), 0.5));
    Ok(())
}

#[test]
fn test_flavor_defaults() -> Result<()> {
    let connectivity = NamedLabels::new("conn", labels(["r1", "r2", "r3"])).shared();
    let series = LabeledArray::builder(Array4::<f64>::zeros((2, 1, 3, 1)))
        .flavor(Flavor::region(connectivity.clone()))
        .build()?;
    assert_eq!(series.axis_names()[2], "Region");
    assert_eq!(series.space_labels(), labels(["r1", "r2", "r3"]));
    assert_eq!(series.title(), "Region Time Series");
    assert_eq!(series.flavor().type_name(), "TimeSeriesRegion");

    let mismatched = LabeledArray::builder(Array4::<f64>::zeros((2, 1, 4, 1)))
        .flavor(Flavor::region(connectivity))
        .build();
    assert_eq!(kind_of(mismatched), ErrorKind::Validation);

    let sensors = NamedLabels::new("seeg", labels(["A1", "A2"])).shared();
    let series = LabeledArray::builder(Array4::<f64>::zeros((2, 1, 2, 1)))
        .flavor(Flavor::sensors(SensorKind::Seeg, sensors))
        .title("implant")
        .build()?;
    assert_eq!(series.axis_names()[2], "Sensor");
    assert_eq!(series.title(), "implant");
    assert_eq!(series.flavor().type_name(), "TimeSeriesSEEG");

    let volume = LabeledArray::builder(Array4::<f64>::zeros((2, 2, 2, 2)))
        .flavor(Flavor::Volume { volume: None })
        .build()?;
    assert_eq!(volume.axis_names(), &["Time", "X", "Y", "Z"].map(String::from));
    Ok(())
}

#[test]
fn test_selector_conversions() {
    assert_eq!(Selector::from(["a", "b"]), Selector::Tokens(labels(["a", "b"])));
    assert_eq!(Selector::from(2usize), Selector::Tokens(vec![Label::Int(2)]));
    assert_eq!(
        Selector::from(1..3),
        Selector::Range(RangeSpec::between(1usize, 3usize))
    );
    assert!(Selector::from(..).is_all());
    assert_eq!(RangeSpec::up_to("r2").with_step(2).step, Some(2));
}

#[test]
fn test_contact_pairing() {
    let pairs = ContactPairing.pairs(&labels(["A1", "A2", "A3", "B1", "B2", "C"]));
    let names: Vec<&str> = pairs.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["A1-A2", "A2-A3", "B1-B2"]);
    assert_eq!((pairs[2].first, pairs[2].second), (3, 4));

    let gap = ContactPairing.pairs(&labels(["A1", "A3"]));
    assert!(gap.is_empty());
}

#[test]
fn test_stat_operation() {
    assert_eq!(StatOperation::Mean, StatOperation::Mean);
    assert_ne!(StatOperation::Mean, StatOperation::Sum);
    assert_eq!(StatOperation::Max.as_str(), "Maximum");

    let lane = arr1(&[1.0, f64::NAN, 3.0, f64::INFINITY]);
    assert!(approx(StatOperation::Mean.apply(lane.view()), 2.0));
    assert!(approx(StatOperation::Sum.apply(lane.view()), 4.0));
    assert!(approx(StatOperation::Min.apply(lane.view()), 1.0));
    assert!(approx(StatOperation::Max.apply(lane.view()), 3.0));

    let empty = arr1(&[f64::NAN, f64::NAN]);
    assert!(StatOperation::Mean.apply(empty.view()).is_nan());
    assert!(StatOperation::Min.apply(empty.view()).is_nan());
    assert!(StatOperation::Max.apply(empty.view()).is_nan());
    assert!(approx(StatOperation::Sum.apply(empty.view()), 0.0));
}

#[test]
fn test_parallel_config() -> Result<()> {
    let default_config = ParallelConfig::default();
    assert!(default_config.num_threads.is_none());

    let config_2 = ParallelConfig::with_threads(2);
    assert_eq!(config_2.num_threads, Some(2));
    assert_eq!(config_2.current_threads(), 2);
    assert_eq!(config_2.install(rayon::current_num_threads)?, 2);

    let all_cores_config = ParallelConfig::all_cores();
    assert!(all_cores_config.num_threads.is_some_and(|n| n > 0));
    assert!(default_config.current_threads() > 0);

    // without a thread count the global pool is left untouched
    default_config.setup_global_pool()?;
    Ok(())
}

#[test]
fn test_parallel_info() {
    let info = get_parallel_info();
    assert!(info.current_threads > 0);
    assert!(info.available_cores > 0);
    assert!(info.available_parallelism > 0);

    // logging must not panic without a logger installed
    info.log_info();
}
