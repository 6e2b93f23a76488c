//! Certificate fingerprints exposed alongside debug passwords

use sha1::Sha1;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::cli::{CERT_FINGERPRINT_NAMESPACE, SHA1_FINGERPRINT_KEY, SHA256_FINGERPRINT_KEY};
use crate::errors::AgentError;
use crate::filesys::file::File;
use crate::host::ConfigStore;
use crate::utils::fingerprint_hex;

/// SHA-1 and SHA-256 fingerprints of a DER certificate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateFingerprints {
    pub sha1: String,
    pub sha256: String,
}

impl CertificateFingerprints {
    pub fn of_der(der: &[u8]) -> Self {
        Self {
            sha1: fingerprint_hex(&Sha1::digest(der)),
            sha256: fingerprint_hex(&Sha256::digest(der)),
        }
    }
}

/// Fingerprint the first certificate of a PEM file
pub async fn fingerprint_pem_file(cert_file: &File) -> Result<CertificateFingerprints, AgentError> {
    let pem = cert_file.read_bytes().await?;
    let der = rustls_pemfile::certs(&mut pem.as_slice())
        .next()
        .ok_or_else(|| {
            AgentError::ConfigError(format!(
                "No certificate found in {}",
                cert_file.path().display()
            ))
        })??;
    Ok(CertificateFingerprints::of_der(der.as_ref()))
}

/// Store fingerprints where debug password responses read them
pub fn record_fingerprints(
    config: &dyn ConfigStore,
    fingerprints: &CertificateFingerprints,
) -> Result<(), AgentError> {
    config.write(
        &[CERT_FINGERPRINT_NAMESPACE, SHA1_FINGERPRINT_KEY],
        fingerprints.sha1.clone().into(),
    )?;
    config.write(
        &[CERT_FINGERPRINT_NAMESPACE, SHA256_FINGERPRINT_KEY],
        fingerprints.sha256.clone().into(),
    )?;
    info!("Recorded certificate fingerprint {}", fingerprints.sha256);
    Ok(())
}
