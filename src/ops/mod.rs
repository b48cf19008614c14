//! Object operation families (§4.5-§4.6), each contributing an
//! `impl<S: Read + Write + ApplyDeadlines> Client<S>` block.

mod balance;
mod contact;
mod domain;
mod host;
mod poll;
