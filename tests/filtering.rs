//! Option/registry interaction: ordering, scoping, composition, and
//! unregistration, driven through isolated `DebugContext` instances.

use dbgchan::prelude::*;

fn flags_of(channels: &[DebugChannel], name: &str) -> ClassFlags {
    channels
        .iter()
        .find(|channel| channel.name() == name)
        .expect("channel present")
        .flags()
}

#[test]
fn option_before_and_after_registration_agree() {
    // add_option then register ...
    let early = DebugContext::new();
    early.add_option("relay", ClassFlags::TRACE, ClassFlags::FIXME);
    let channels_early = channel_array(&["heap", "relay"]);
    early.register(channels_early.clone());

    // ... versus register then add_option.
    let late = DebugContext::new();
    let channels_late = channel_array(&["heap", "relay"]);
    late.register(channels_late.clone());
    late.add_option("relay", ClassFlags::TRACE, ClassFlags::FIXME);

    assert_eq!(flags_of(&channels_early, "relay"), flags_of(&channels_late, "relay"));
    assert_eq!(flags_of(&channels_early, "heap"), flags_of(&channels_late, "heap"));
}

#[test]
fn later_option_wins_per_bit() {
    let ctx = DebugContext::new();
    let channels = channel_array(&["relay"]);
    ctx.register(channels.clone());

    ctx.add_option("relay", ClassFlags::TRACE, ClassFlags::empty());
    ctx.add_option("relay", ClassFlags::empty(), ClassFlags::TRACE);
    assert!(!channels[0].enabled(DebugClass::Trace));

    // And the other way around: a later set overrides an earlier clear.
    ctx.add_option("relay", ClassFlags::TRACE, ClassFlags::empty());
    assert!(channels[0].enabled(DebugClass::Trace));

    // Untouched bits ride along through every application.
    assert_eq!(channels[0].flags(), ClassFlags::DEFAULT | ClassFlags::TRACE);
}

#[test]
fn empty_name_reaches_every_channel_of_every_module() {
    let ctx = DebugContext::new();
    let first = channel_array(&["heap", "relay"]);
    let second = channel_array(&["msgbox", "ole"]);
    ctx.register(first.clone());
    ctx.register(second.clone());

    ctx.add_option("", ClassFlags::TRACE, ClassFlags::empty());
    for channel in first.iter().chain(second.iter()) {
        assert!(channel.enabled(DebugClass::Trace), "{} missed", channel.name());
    }
}

#[test]
fn named_option_is_exact_and_module_local_in_effect() {
    let ctx = DebugContext::new();
    let first = channel_array(&["relay", "relays"]);
    let second = channel_array(&["heap", "msgbox"]);
    ctx.register(first.clone());
    ctx.register(second.clone());

    ctx.add_option("relay", ClassFlags::empty(), ClassFlags::all());

    assert_eq!(flags_of(&first, "relay"), ClassFlags::empty());
    // Not a prefix match: "relays" is untouched.
    assert_eq!(flags_of(&first, "relays"), ClassFlags::DEFAULT);
    // The module without that channel is fully untouched.
    assert_eq!(flags_of(&second, "heap"), ClassFlags::DEFAULT);
    assert_eq!(flags_of(&second, "msgbox"), ClassFlags::DEFAULT);

    // Case-sensitive: "Relay" does not match "relay".
    ctx.add_option("Relay", ClassFlags::TRACE, ClassFlags::empty());
    assert_eq!(flags_of(&first, "relay"), ClassFlags::empty());
}

#[test]
fn overlong_names_match_through_truncation() {
    // Both the option name and a channel named like its truncated form.
    let truncated: String = "x".repeat(OPTION_NAME_CAPACITY);
    let overlong: String = "x".repeat(OPTION_NAME_CAPACITY + 1);

    let ctx = DebugContext::new();
    let channels = channel_array(&[truncated.as_str(), "zz"]);
    ctx.register(channels.clone());

    // capacity + 1: stored truncated, so it hits the capacity-length channel.
    ctx.add_option(&overlong, ClassFlags::TRACE, ClassFlags::empty());
    assert!(flags_of(&channels, &truncated).contains(ClassFlags::TRACE));

    // Exactly capacity: stored verbatim.
    let ctx = DebugContext::new();
    let channels = channel_array(&[truncated.as_str()]);
    ctx.register(channels.clone());
    ctx.add_option(&truncated, ClassFlags::empty(), ClassFlags::all());
    assert_eq!(flags_of(&channels, &truncated), ClassFlags::empty());

    // capacity - 1: no truncation, and no accidental match of longer names.
    let shorter: String = "x".repeat(OPTION_NAME_CAPACITY - 1);
    let ctx = DebugContext::new();
    let channels = channel_array(&[truncated.as_str()]);
    ctx.register(channels.clone());
    ctx.add_option(&shorter, ClassFlags::TRACE, ClassFlags::empty());
    assert!(!flags_of(&channels, &truncated).contains(ClassFlags::TRACE));
}

#[test]
fn parse_reports_errors_and_applies_the_rest() {
    let ctx = DebugContext::new();
    let channels = channel_array(&["other", "relay"]);
    ctx.register(channels.clone());

    let errors = ctx.parse_options("relay-,fixme+,bogus+");
    assert_eq!(errors, 1);

    // relay-: every class off for relay; fixme+ then turns exactly the
    // fixme bit back on everywhere, relay included.
    assert_eq!(flags_of(&channels, "relay"), ClassFlags::FIXME);
    assert_eq!(flags_of(&channels, "other"), ClassFlags::DEFAULT);
}

#[test]
fn all_alias_equals_empty_name() {
    let via_alias = DebugContext::new();
    let channels_alias = channel_array(&["heap", "relay"]);
    via_alias.register(channels_alias.clone());
    via_alias.parse_options("all");

    let via_empty = DebugContext::new();
    let channels_empty = channel_array(&["heap", "relay"]);
    via_empty.register(channels_empty.clone());
    via_empty.add_option("", ClassFlags::all(), ClassFlags::empty());

    for (a, b) in channels_alias.iter().zip(channels_empty.iter()) {
        assert_eq!(a.flags(), b.flags());
        assert_eq!(a.flags(), ClassFlags::all());
    }
}

#[test]
fn unregister_null_is_noop_and_real_unregister_detaches() {
    let ctx = DebugContext::new();
    ctx.unregister(RegistrationHandle::NULL);
    assert_eq!(ctx.module_count(), 0);

    let detached = channel_array(&["relay"]);
    let kept = channel_array(&["relay"]);
    let handle = ctx.register(detached.clone());
    ctx.register(kept.clone());
    assert_eq!(ctx.module_count(), 2);

    ctx.unregister(handle);
    assert_eq!(ctx.module_count(), 1);

    ctx.add_option("relay", ClassFlags::TRACE, ClassFlags::empty());
    assert!(!detached[0].enabled(DebugClass::Trace));
    assert!(kept[0].enabled(DebugClass::Trace));
}

#[test]
fn registration_order_with_mixed_options() {
    let ctx = DebugContext::new();
    ctx.parse_options("fixme-all");

    let first = channel_array(&["comctl32"]);
    ctx.register(first.clone());
    ctx.parse_options("trace+comctl32");

    let second = channel_array(&["comctl32"]);
    ctx.register(second.clone());

    // Both modules end in the same state regardless of when they arrived.
    assert_eq!(first[0].flags(), second[0].flags());
    let expected = (ClassFlags::DEFAULT - ClassFlags::FIXME) | ClassFlags::TRACE;
    assert_eq!(first[0].flags(), expected);
}
