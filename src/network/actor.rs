//! Network actor - runs collaborator calls in the Tokio runtime, each one
//! cancellable by id

use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;

use crate::error::{BrowserError, ErrorKind};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::{create_client, fetch_batch, BatchEndpoint};
use crate::network::preview::fetch_preview;
use crate::network::save::save_image;
use crate::platform::{MediaLibrary, ShareSheet};

/// Tracks an active task for cancellation
struct ActiveTask {
    cancel_tx: oneshot::Sender<()>,
}

/// Platform collaborators the actor hands work to
#[derive(Clone)]
pub struct Collaborators {
    pub share: Arc<dyn ShareSheet>,
    pub media: Arc<dyn MediaLibrary>,
    pub staging_dir: PathBuf,
}

/// Network actor that processes fetch, share and save commands
pub struct NetworkActor {
    client: reqwest::Client,
    endpoint: BatchEndpoint,
    collaborators: Collaborators,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_tasks: JoinSet<u64>,
    cancel_handles: HashMap<u64, ActiveTask>,
}

impl NetworkActor {
    pub fn new(
        response_tx: mpsc::UnboundedSender<NetworkResponse>,
        endpoint: BatchEndpoint,
        collaborators: Collaborators,
    ) -> Self {
        NetworkActor {
            client: create_client(),
            endpoint,
            collaborators,
            response_tx,
            active_tasks: JoinSet::new(),
            cancel_handles: HashMap::new(),
        }
    }

    /// Spawn `work` so that it can be cancelled by `id`. A cancelled task
    /// sends nothing back.
    fn spawn_cancellable<F>(&mut self, id: u64, work: F)
    where
        F: Future<Output = NetworkResponse> + Send + 'static,
    {
        let (cancel_tx, mut cancel_rx) = oneshot::channel();
        self.cancel_handles.insert(id, ActiveTask { cancel_tx });
        let response_tx = self.response_tx.clone();

        self.active_tasks.spawn(async move {
            tokio::select! {
                biased;

                _ = &mut cancel_rx => {
                    tracing::debug!(id, "task cancelled");
                }
                response = work => {
                    let _ = response_tx.send(response);
                }
            }
            id
        });
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                // Handle incoming commands
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::FetchBatch { id }) => {
                            let client = self.client.clone();
                            let endpoint = self.endpoint.clone();

                            self.spawn_cancellable(id, async move {
                                tracing::info!(id, url = %endpoint.url(), count = endpoint.count, "Fetching batch");
                                match fetch_batch(&client, &endpoint).await {
                                    Ok(images) => NetworkResponse::BatchLoaded { id, images },
                                    Err(e) => NetworkResponse::BatchFailed { id, error: e.to_string() },
                                }
                            });
                        }

                        Some(NetworkCommand::FetchPreview { id, image_id, url }) => {
                            let client = self.client.clone();

                            self.spawn_cancellable(id, async move {
                                match fetch_preview(&client, &url).await {
                                    Ok(preview) => NetworkResponse::PreviewReady {
                                        id,
                                        image_id,
                                        preview: Arc::new(preview),
                                    },
                                    Err(e) => NetworkResponse::PreviewFailed {
                                        id,
                                        image_id,
                                        error: e.to_string(),
                                    },
                                }
                            });
                        }

                        Some(NetworkCommand::Share { id, message }) => {
                            let share = self.collaborators.share.clone();

                            self.spawn_cancellable(id, async move {
                                let result = tokio::task::spawn_blocking(move || share.share(&message))
                                    .await
                                    .map_err(BrowserError::from)
                                    .and_then(|shared| shared);
                                match result {
                                    Ok(()) => NetworkResponse::Shared { id },
                                    Err(e) => NetworkResponse::ShareFailed { id, error: e.to_string() },
                                }
                            });
                        }

                        Some(NetworkCommand::SaveImage { id, image }) => {
                            let client = self.client.clone();
                            let media = self.collaborators.media.clone();
                            let staging_dir = self.collaborators.staging_dir.clone();

                            self.spawn_cancellable(id, async move {
                                tracing::info!(id, image_id = %image.id, "Saving image");
                                match save_image(id, &client, media, &staging_dir, &image).await {
                                    Ok(path) => NetworkResponse::Saved { id, path },
                                    Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                                        NetworkResponse::SaveDenied { id }
                                    }
                                    Err(e) => NetworkResponse::SaveFailed { id, error: e.to_string() },
                                }
                            });
                        }

                        Some(NetworkCommand::Cancel(id)) => {
                            if let Some(active) = self.cancel_handles.remove(&id) {
                                tracing::info!(id, "Cancelling task");
                                let _ = active.cancel_tx.send(());
                            }
                        }

                        Some(NetworkCommand::Shutdown) | None => {
                            // Cancel all active tasks
                            for (_, active) in self.cancel_handles.drain() {
                                let _ = active.cancel_tx.send(());
                            }
                            break;
                        }
                    }
                }

                // Forget handles of completed tasks
                Some(result) = self.active_tasks.join_next() => {
                    if let Ok(id) = result {
                        self.cancel_handles.remove(&id);
                    }
                }
            }
        }

        // Let cancelled tasks observe their signal before the runtime drops them
        while self.active_tasks.join_next().await.is_some() {}
    }
}
