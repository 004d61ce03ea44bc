//! Cross-module scenarios: pool properties under random workloads and
//! server-to-client replication.

mod replication;
