use dispatch_fixture::subclass;

struct Base {
    value: i32,
}

#[subclass(Base)]
struct Child;

fn main() {
    let child = Child {
        base: Base { value: 3 },
    };

    // Field access and upcasting fall through to the embedded base.
    assert_eq!(child.value, 3);
    let base: &Base = &child;
    assert_eq!(base.value, 3);
}
