use stationflow_core::{Channel, CHANNEL_REGISTRY};

#[test]
fn registry_covers_every_channel_in_declaration_order() {
    assert_eq!(CHANNEL_REGISTRY.len(), Channel::ALL.len());
    for (channel, spec) in Channel::ALL.iter().zip(CHANNEL_REGISTRY.iter()) {
        assert_eq!(spec.channel, *channel);
    }
}

#[test]
fn spec_lookup_returns_the_matching_entry() {
    assert_eq!(Channel::Pressure.spec().unit, "barg");
    assert_eq!(Channel::Temperature.spec().unit, "°C");
    assert_eq!(Channel::Flow.spec().unit, "MMscfd");
    for channel in Channel::ALL {
        assert_eq!(channel.spec().channel, channel);
    }
}

#[test]
fn channel_names_parse_including_column_aliases() {
    assert_eq!(Channel::try_from("pressure"), Ok(Channel::Pressure));
    assert_eq!(Channel::try_from("flow_mmscfd"), Ok(Channel::Flow));
    assert!(Channel::try_from("vibration").is_err());
}
