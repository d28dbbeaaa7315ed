// Generated proto modules will be included here after build
// Run `cargo build` to generate the proto code

pub mod common {
    include!("grocery.common.rs");
}

pub mod items {
    include!("grocery.items.rs");
}

pub mod suppliers {
    include!("grocery.suppliers.rs");
}

pub mod health {
    include!("grocery.health.rs");
}
