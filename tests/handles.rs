use dispatch_fixture::*;

fn labels() -> Vec<String> {
    trace::take()
        .expect("couldn't drain the trace")
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[test]
fn full_scenario_non_virtual_hierarchy() {
    trace::clear().unwrap();

    let sub = Handle::new(SubA::new());
    sub.normal_method();
    sub.virtual_method();
    sub.virtual_method2();

    let base = sub.into_base();
    base.normal_method();
    base.virtual_method();
    base.virtual_method2();
    drop(base);

    assert_eq!(
        labels(),
        [
            "BaseA",
            "SubA",
            "SubA::normal_method",
            "SubA::virtual_method",
            "SubA::virtual_method2",
            "BaseA::normal_method",
            "SubA::virtual_method",
            "SubA::virtual_method2",
            "~BaseA",
        ]
    );
}

#[test]
fn full_scenario_virtual_hierarchy() {
    trace::clear().unwrap();

    let sub = Handle::new(SubB::new());
    sub.normal_method();

    let base = sub.into_base();
    base.normal_method();
    base.virtual_method();
    drop(base);

    assert_eq!(
        labels(),
        [
            "BaseB",
            "SubB",
            "SubB::normal_method",
            "BaseB::normal_method",
            "SubB::virtual_method",
            "~SubB",
            "~BaseB",
        ]
    );
}

#[test]
fn structural_assertions_on_events() {
    trace::clear().unwrap();

    drop(Handle::new(SubB::new()).into_base());

    let events = trace::take().unwrap();
    assert_eq!(
        events,
        [
            Event::Construct("BaseB"),
            Event::Construct("SubB"),
            Event::Destroy("SubB"),
            Event::Destroy("BaseB"),
        ]
    );
    assert!(events.iter().all(|event| event.type_name().ends_with('B')));
}

#[test]
fn base_only_instances_work_through_handles() {
    trace::clear().unwrap();

    let base = Handle::new(BaseA::new());
    base.normal_method();
    base.virtual_method();
    drop(base);

    assert_eq!(
        labels(),
        [
            "BaseA",
            "BaseA::normal_method",
            "BaseA::virtual_method",
            "~BaseA",
        ]
    );
}

#[test]
fn mutable_access_through_handles() {
    trace::clear().unwrap();

    let mut sub = Handle::new(SubA::new());
    let sub_ref: &mut SubA = &mut sub;
    sub_ref.normal_method();
    drop(sub);

    assert_eq!(
        labels(),
        ["BaseA", "SubA", "SubA::normal_method", "~SubA", "~BaseA"]
    );
}
