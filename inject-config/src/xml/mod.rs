//! XML form of container configuration.
//!
//! ```xml
//! <container>
//!   <alias alias="int" type="System.Int32"/>
//!   <register type="IWidget" mapTo="Widget" name="primary">
//!     <constructor>
//!       <param name="logger" type="ILogger"/>
//!       <param name="size"><value value="3"/></param>
//!     </constructor>
//!     <method name="Init">
//!       <param name="service"><dependency name="special"/></param>
//!     </method>
//!   </register>
//! </container>
//! ```
//!
//! `<param>` elements are listed in the order the arguments are passed.
//! Member keys are not part of the format; every load assigns fresh ones.

mod names;
mod reader;
mod writer;

pub use reader::{parse_config, parse_member};
