//! Kubernetes client for podphase

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use k8s_openapi::api::core::v1::Pod;
use kube::Api;
use kube::api::ListParams;
use kube::config::{KubeConfigOptions, Kubeconfig};
use tracing::{debug, info, warn};

use podphase_types::{PodPhase, PodRecord};

use crate::error::{ClientError, ClientResult};

/// Where cluster credentials came from
enum Credentials {
    Kubeconfig(Kubeconfig),
    /// Service-account config of the pod we run in
    InCluster(kube::Config),
}

/// Kubernetes client wrapper
pub struct KubeClient {
    credentials: Credentials,
}

impl KubeClient {
    /// Load the kubeconfig from `path`. Without a path, read the default
    /// kubeconfig (`KUBECONFIG`, then `~/.kube/config`) and fall back to the
    /// in-cluster service account when that fails
    pub fn load(path: Option<&Path>) -> ClientResult<Self> {
        match path {
            Some(path) => {
                debug!(path = %path.display(), "reading kubeconfig");
                let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
                    ClientError::configuration(format!(
                        "failed to read {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                Ok(Self::from_kubeconfig(kubeconfig))
            }
            None => {
                let kubeconfig = Kubeconfig::read().map_err(|e| e.to_string());
                Self::from_default_sources(kubeconfig, || {
                    kube::Config::incluster().map_err(|e| e.to_string())
                })
            }
        }
    }

    /// Prefer the kubeconfig; only consult the in-cluster config if it is unusable
    fn from_default_sources<F>(
        kubeconfig: Result<Kubeconfig, String>,
        incluster: F,
    ) -> ClientResult<Self>
    where
        F: FnOnce() -> Result<kube::Config, String>,
    {
        let kubeconfig_err = match kubeconfig {
            Ok(kubeconfig) => return Ok(Self::from_kubeconfig(kubeconfig)),
            Err(e) => e,
        };
        debug!(error = %kubeconfig_err, "no kubeconfig, trying in-cluster config");

        match incluster() {
            Ok(config) => Ok(Self {
                credentials: Credentials::InCluster(config),
            }),
            Err(incluster_err) => Err(ClientError::configuration(format!(
                "{}; in-cluster config unavailable: {}. Is kubectl configured?",
                kubeconfig_err, incluster_err
            ))),
        }
    }

    fn from_kubeconfig(kubeconfig: Kubeconfig) -> Self {
        Self {
            credentials: Credentials::Kubeconfig(kubeconfig),
        }
    }

    /// Names of all contexts in the kubeconfig
    fn contexts(kubeconfig: &Kubeconfig) -> Vec<&str> {
        kubeconfig
            .contexts
            .iter()
            .map(|ctx| ctx.name.as_str())
            .collect()
    }

    /// Pick the requested context, falling back to the current one
    fn resolve_context(kubeconfig: &Kubeconfig, context: Option<&str>) -> ClientResult<String> {
        match context {
            Some(name) => {
                if !Self::contexts(kubeconfig).contains(&name) {
                    return Err(ClientError::configuration(format!(
                        "context '{}' not found in kubeconfig",
                        name
                    )));
                }
                Ok(name.to_string())
            }
            None => kubeconfig.current_context.clone().ok_or_else(|| {
                ClientError::configuration("no current context set and none was requested")
            }),
        }
    }

    /// Create a kube::Client for a context (the current one if `None`)
    pub async fn connect(&self, context: Option<&str>) -> ClientResult<kube::Client> {
        let kubeconfig = match &self.credentials {
            Credentials::Kubeconfig(kubeconfig) => kubeconfig,
            Credentials::InCluster(config) => {
                if let Some(name) = context {
                    return Err(ClientError::configuration(format!(
                        "context '{}' requested but no kubeconfig was found",
                        name
                    )));
                }
                debug!("building in-cluster client");
                return kube::Client::try_from(config.clone()).map_err(|e| {
                    ClientError::connection(format!("failed to create in-cluster client: {}", e))
                });
            }
        };

        let context_name = Self::resolve_context(kubeconfig, context)?;
        debug!(context = %context_name, "building client");

        let config = kube::Config::from_custom_kubeconfig(
            kubeconfig.clone(),
            &KubeConfigOptions {
                context: Some(context_name.clone()),
                ..Default::default()
            },
        )
        .await
        .map_err(|e| {
            ClientError::connection(format!(
                "failed to create config for context {}: {}",
                context_name, e
            ))
        })?;

        kube::Client::try_from(config).map_err(|e| {
            ClientError::connection(format!(
                "failed to create client for context {}: {}",
                context_name, e
            ))
        })
    }

    /// Fetch pods with a single list call, across all namespaces unless one is given
    pub async fn list_pods(
        &self,
        client: &kube::Client,
        namespace: Option<&str>,
        timeout: Option<Duration>,
    ) -> ClientResult<Vec<PodRecord>> {
        let pods: Api<Pod> = match namespace {
            Some(ns) => Api::namespaced(client.clone(), ns),
            None => Api::all(client.clone()),
        };

        let list = with_deadline(
            async { pods.list(&ListParams::default()).await.map_err(ClientError::from) },
            timeout,
        )
        .await?;

        info!(
            count = list.items.len(),
            namespace = namespace.unwrap_or("*"),
            "fetched pods"
        );

        Ok(list.items.into_iter().map(pod_to_record).collect())
    }
}

/// Await `fut`, failing with [`ClientError::Timeout`] once `timeout` elapses
async fn with_deadline<F, T>(fut: F, timeout: Option<Duration>) -> ClientResult<T>
where
    F: Future<Output = ClientResult<T>>,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| ClientError::Timeout(limit))?,
        None => fut.await,
    }
}

/// Convert a k8s Pod to a PodRecord
pub fn pod_to_record(pod: Pod) -> PodRecord {
    let name = pod.metadata.name.unwrap_or_default();
    let namespace = pod.metadata.namespace.unwrap_or_default();

    let phase = match pod.status.and_then(|s| s.phase) {
        Some(raw) => PodPhase::parse(&raw).unwrap_or_else(|| {
            warn!(
                pod = %name,
                namespace = %namespace,
                phase = %raw,
                "unrecognized pod phase, counting as Unknown"
            );
            PodPhase::Unknown
        }),
        None => PodPhase::Unknown,
    };

    PodRecord::new(name, phase).with_namespace(namespace)
}
