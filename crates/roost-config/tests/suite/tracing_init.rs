use roost_config::{init_tracing, LoggingConfig};

#[test]
fn second_install_is_a_no_op() {
    let config = LoggingConfig {
        level: "roost.finder=trace,warn".to_owned(),
        json: true,
    };
    let first = init_tracing(&config);
    let second = init_tracing(&LoggingConfig::default());
    // Another test in this binary may have installed a subscriber first.
    assert!(!second || !first);
    assert!(!init_tracing(&config));
}
