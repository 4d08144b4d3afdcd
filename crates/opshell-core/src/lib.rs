//! # opshell-core
//!
//! Schema-driven command adapter. One [`OperationSpec`](schema::OperationSpec)
//! row describes a command; [`Adapter`](executor::Adapter) runs any row
//! through the same pipeline:
//!
//! - **binding** – names, aliases and type coercion for caller arguments
//! - **context** – bound values plus the resolved `-Select`
//! - **request** – member-keyed request object, nested groups on demand
//! - **confirm** – impact threshold and prompt
//! - **invoke** – the async seam to a service client
//! - **output** – projection, collection enumeration, sinks
//! - **executor** – single calls and automatic pagination

pub mod binding;
pub mod confirm;
pub mod context;
pub mod error;
pub mod executor;
pub mod invoke;
pub mod output;
pub mod request;
pub mod schema;
pub mod select;
pub mod testing;

pub use binding::{ArgValue, Invocation};
pub use confirm::{AutoAccept, AutoDecline, ConfirmPolicy, ConfirmPrompt, Confirmer};
pub use context::ExecutionContext;
pub use error::{AdapterError, InvokeError};
pub use executor::{Adapter, Outcome};
pub use invoke::OperationInvoker;
pub use output::{CmdletOutput, CollectingSink, OutputSink};
pub use schema::{ConfirmImpact, OperationSpec, ParamKind, ParamSpec, ServiceSpec};
