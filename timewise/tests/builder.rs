use timewise::{
    DetectConfig, FrequencyConfig, MIN_FREQUENCY_SAMPLE, PeriodUnit, Timewise, TimewiseConfig,
    TimewiseError,
};

#[test]
fn defaults() {
    let tw = Timewise::builder().build().unwrap();
    assert_eq!(tw.config(), &TimewiseConfig::default());
    assert_eq!(tw.config().floor_unit, PeriodUnit::Day);
    assert_eq!(tw.frequency_config().sample_size, 10);
    assert!(!tw.frequency_config().force_regular);
    assert!(!tw.detect_config().verbose);
}

#[test]
fn modifiers_are_applied() {
    let tw = Timewise::builder()
        .floor_unit(PeriodUnit::QUARTER)
        .sample_size(25)
        .force_regular(true)
        .verbose(true)
        .build()
        .unwrap();
    assert_eq!(tw.config().floor_unit, PeriodUnit::QUARTER);
    assert_eq!(
        tw.frequency_config(),
        FrequencyConfig {
            sample_size: 25,
            force_regular: true
        }
    );
    assert_eq!(tw.detect_config(), DetectConfig { verbose: true });
}

#[test]
fn whole_config_can_be_supplied() {
    let cfg = TimewiseConfig {
        floor_unit: PeriodUnit::Hour,
        frequency: FrequencyConfig::regular(true),
        detect: DetectConfig::default(),
    };
    let tw = Timewise::builder().config(cfg).build().unwrap();
    assert_eq!(tw.config(), &cfg);
}

#[test]
fn too_small_sample_is_rejected() {
    let err = Timewise::builder()
        .sample_size(MIN_FREQUENCY_SAMPLE - 1)
        .build()
        .unwrap_err();
    assert!(matches!(err, TimewiseError::InvalidArg(_)));
    assert!(
        Timewise::builder()
            .sample_size(MIN_FREQUENCY_SAMPLE)
            .build()
            .is_ok()
    );
}
