//! The fluent builder layer: one mutable selection tree owned by an
//! [`OperationBuilder`], addressed through path-scoped handles.

mod field_handle;
mod field_init;
mod fragment_def;
mod operation;
mod operation_builder;
mod operation_kind;
mod selection_handle;

pub use field_handle::FieldHandle;
pub use field_init::FieldInit;
pub use fragment_def::FragmentDef;
pub use operation::Operation;
pub use operation_builder::OperationBuilder;
pub use operation_kind::OperationKind;
pub use selection_handle::SelectionHandle;
