//! Orchestrator module
//!
//! Client traits consumed by namespace authorization, and a Kubernetes API
//! implementation of them.

pub mod client;
pub mod kubernetes;

pub use client::{ClientFactory, OrchestratorClient, SharedClientFactory};
pub use kubernetes::{KubeClient, KubeClientFactory};
