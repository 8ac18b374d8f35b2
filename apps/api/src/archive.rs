use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::config::S3Config;
use crate::documents::DocumentFormat;

/// Keeps a copy of every uploaded resume document in object storage.
#[derive(Clone)]
pub struct ResumeArchive {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl ResumeArchive {
    /// Constructs an S3 client configured for MinIO (explicit endpoint) or AWS.
    pub async fn connect(config: &S3Config) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new("us-east-1"));

        if let (Some(key_id), Some(secret)) = (&config.access_key_id, &config.secret_access_key) {
            loader = loader.credentials_provider(Credentials::new(
                key_id,
                secret,
                None,
                None,
                "jobwise-static",
            ));
        }
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        Self {
            client: aws_sdk_s3::Client::new(&sdk_config),
            bucket: config.bucket.clone(),
        }
    }

    /// Uploads the document and returns its object key.
    pub async fn store(&self, format: DocumentFormat, body: Bytes) -> Result<String> {
        let key = archive_key(Uuid::new_v4(), format);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(body))
            .content_type(format.content_type())
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("S3 upload failed: {e}"))?;

        info!("Archived resume to s3://{}/{}", self.bucket, key);
        Ok(key)
    }
}

fn archive_key(id: Uuid, format: DocumentFormat) -> String {
    format!("resumes/{}.{}", id, format.extension())
}
