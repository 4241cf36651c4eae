use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("No kubeconfig found: set kube_config, the KUBECONFIG environment variable, or create {0}")]
    KubeconfigNotFound(String),

    #[error("Failed to read kubeconfig {path}: {source}")]
    KubeconfigRead {
        path: String,
        #[source]
        source: kube::config::KubeconfigError,
    },

    #[error("Invalid kubeconfig: {0}")]
    InvalidKubeconfig(#[from] kube::config::KubeconfigError),

    #[error("Failed to build Kubernetes client: {0}")]
    ClientBuild(#[source] kube::Error),

    #[error("Kubernetes error: {0}")]
    KubernetesError(#[from] kube::Error),
}
