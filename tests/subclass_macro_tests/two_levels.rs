use dispatch_fixture::subclass;

struct Root {
    depth: u32,
}

#[subclass(Root)]
struct Middle;

#[subclass(Middle)]
struct Leaf;

fn main() {
    let leaf = Leaf {
        base: Middle {
            base: Root { depth: 2 },
        },
    };

    // Deref chains through every level.
    assert_eq!(leaf.depth, 2);
    let root: &Root = &leaf;
    assert_eq!(root.depth, 2);
}
