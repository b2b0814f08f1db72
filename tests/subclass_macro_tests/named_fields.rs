use dispatch_fixture::subclass;

struct Base {
    value: i32,
}

impl Base {
    fn describe(&self) -> i32 {
        self.value
    }
}

#[subclass(Base)]
struct Child {
    extra: i32,
}

fn main() {
    let mut child = Child {
        base: Base { value: 1 },
        extra: 2,
    };

    assert_eq!(child.describe(), 1);
    assert_eq!(child.extra, 2);

    let base: &mut Base = &mut child;
    base.value = 10;
    assert_eq!(child.describe(), 10);
}
