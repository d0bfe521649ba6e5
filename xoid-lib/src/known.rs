//! Names for well-known object identifiers.
//!
//! Covers the identifiers that show up in X.509 certificates: distinguished
//! name attributes (RFC 4519 / X.520), signature and key algorithms
//! (RFC 3279, RFC 5480, RFC 8410), named curves, X.509v3 extensions
//! (RFC 5280 Section 4.2) and extended key usages. The table is a naming aid
//! only; any syntactically valid OID parses whether or not it is listed.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::Oid;

pub const COMMON_NAME: &str = "2.5.4.3";
pub const COUNTRY: &str = "2.5.4.6";
pub const ORGANIZATION: &str = "2.5.4.10";
pub const EMAIL_ADDRESS: &str = "1.2.840.113549.1.9.1";

pub const RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.1";
pub const SHA256_WITH_RSA: &str = "1.2.840.113549.1.1.11";
pub const EC_PUBLIC_KEY: &str = "1.2.840.10045.2.1";
pub const ECDSA_WITH_SHA256: &str = "1.2.840.10045.4.3.2";
pub const ED25519: &str = "1.3.101.112";

pub const EXT_SUBJECT_ALT_NAME: &str = "2.5.29.17";
pub const EXT_BASIC_CONSTRAINTS: &str = "2.5.29.19";
pub const EXT_EXTENDED_KEY_USAGE: &str = "2.5.29.37";

pub const EKU_SERVER_AUTH: &str = "1.3.6.1.5.5.7.3.1";
pub const EKU_CLIENT_AUTH: &str = "1.3.6.1.5.5.7.3.2";

/// `(dotted form, name)` pairs. Names follow OpenSSL's short names where one
/// exists, otherwise its long name.
const NAMES: &[(&str, &str)] = &[
    // Distinguished name attributes
    (COMMON_NAME, "CN"),
    ("2.5.4.4", "SN"),
    ("2.5.4.5", "serialNumber"),
    (COUNTRY, "C"),
    ("2.5.4.7", "L"),
    ("2.5.4.8", "ST"),
    ("2.5.4.9", "street"),
    (ORGANIZATION, "O"),
    ("2.5.4.11", "OU"),
    ("2.5.4.12", "title"),
    ("2.5.4.17", "postalCode"),
    ("2.5.4.42", "GN"),
    (EMAIL_ADDRESS, "emailAddress"),
    ("0.9.2342.19200300.100.1.25", "DC"),
    // Signature algorithms
    ("1.2.840.113549.1.1.5", "sha1WithRSAEncryption"),
    (SHA256_WITH_RSA, "sha256WithRSAEncryption"),
    ("1.2.840.113549.1.1.12", "sha384WithRSAEncryption"),
    ("1.2.840.113549.1.1.13", "sha512WithRSAEncryption"),
    (ECDSA_WITH_SHA256, "ecdsa-with-SHA256"),
    ("1.2.840.10045.4.3.3", "ecdsa-with-SHA384"),
    ("1.2.840.10045.4.3.4", "ecdsa-with-SHA512"),
    (ED25519, "ED25519"),
    ("1.3.101.113", "ED448"),
    // Public key types and curves
    (RSA_ENCRYPTION, "rsaEncryption"),
    (EC_PUBLIC_KEY, "id-ecPublicKey"),
    ("1.2.840.10045.3.1.7", "prime256v1"),
    ("1.3.132.0.34", "secp384r1"),
    ("1.3.132.0.35", "secp521r1"),
    // X.509v3 extensions
    ("2.5.29.14", "subjectKeyIdentifier"),
    ("2.5.29.15", "keyUsage"),
    (EXT_SUBJECT_ALT_NAME, "subjectAltName"),
    ("2.5.29.18", "issuerAltName"),
    (EXT_BASIC_CONSTRAINTS, "basicConstraints"),
    ("2.5.29.30", "nameConstraints"),
    ("2.5.29.31", "crlDistributionPoints"),
    ("2.5.29.32", "certificatePolicies"),
    ("2.5.29.35", "authorityKeyIdentifier"),
    (EXT_EXTENDED_KEY_USAGE, "extendedKeyUsage"),
    ("1.3.6.1.5.5.7.1.1", "authorityInfoAccess"),
    ("1.3.6.1.4.1.11129.2.4.2", "ct_precert_scts"),
    // Extended key usages
    (EKU_SERVER_AUTH, "serverAuth"),
    (EKU_CLIENT_AUTH, "clientAuth"),
    ("1.3.6.1.5.5.7.3.3", "codeSigning"),
    ("1.3.6.1.5.5.7.3.4", "emailProtection"),
    ("1.3.6.1.5.5.7.3.8", "timeStamping"),
    ("1.3.6.1.5.5.7.3.9", "OCSPSigning"),
    ("2.5.29.37.0", "anyExtendedKeyUsage"),
];

fn table() -> &'static HashMap<Oid, &'static str> {
    static TABLE: OnceLock<HashMap<Oid, &'static str>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let map: HashMap<Oid, &'static str> = NAMES
            .iter()
            .filter_map(|(dotted, name)| match dotted.parse::<Oid>() {
                Ok(oid) => Some((oid, *name)),
                Err(e) => {
                    log::warn!("skipping known OID entry {}: {}", dotted, e);
                    None
                }
            })
            .collect();
        log::trace!("built known OID table with {} entries", map.len());
        map
    })
}

/// The well-known name of `oid`, if it is in the table.
pub fn short_name(oid: &Oid) -> Option<&'static str> {
    table().get(oid).copied()
}

/// Look up a well-known OID by name (case-insensitive).
pub fn by_name(name: &str) -> Option<Oid> {
    table()
        .iter()
        .find(|(_, n)| n.eq_ignore_ascii_case(name))
        .map(|(oid, _)| oid.clone())
}
