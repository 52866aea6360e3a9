// Property-based tests

use num_bigint::BigUint;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use rsa_armor::codec::base64;
use rsa_armor::rsa::{add_padding, decrypt_bytes, encrypt_bytes, generate_keypair, remove_padding};
use rsa_armor::{Certificate, ChunkPolicy, Exportable, Format, RsaKeyPair, RsaPrivateKey, RsaPublicKey};

prop_compose! {
    // Small keys keep the suite fast; the properties do not depend on size
    fn key_pair()(seed in any::<[u8; 32]>()) -> RsaKeyPair {
        let mut rng = ChaCha8Rng::from_seed(seed);
        generate_keypair(64, &mut rng).unwrap()
    }
}

fn any_format() -> impl Strategy<Value = Format> {
    prop_oneof![Just(Format::Armored), Just(Format::Structured)]
}

fn any_policy() -> impl Strategy<Value = ChunkPolicy> {
    prop_oneof![Just(ChunkPolicy::PerByte), Just(ChunkPolicy::ModulusSized)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn encrypt_decrypt_roundtrip(pair in key_pair(), msg in any::<Vec<u8>>(), policy in any_policy()) {
        let (e, d, n) = (&pair.public_key.e, &pair.private_key.d, &pair.public_key.n);
        let blocks = encrypt_bytes(&msg, e, n, policy).unwrap();
        prop_assert!(blocks.iter().all(|block| block < n));
        prop_assert_eq!(decrypt_bytes(&blocks, d, n, policy).unwrap(), msg);
    }

    #[test]
    fn sign_verify_roundtrip(pair in key_pair(), msg in ".*", extra in "[a-z]") {
        let signature = pair.private_key.sign(&msg).unwrap();
        prop_assert!(pair.public_key.verify(&signature, &msg));

        let mutated = format!("{}{}", msg, extra);
        prop_assert!(!pair.public_key.verify(&signature, &mutated));
    }

    #[test]
    fn key_export_roundtrip(pair in key_pair(), format in any_format()) {
        let public_key = RsaPublicKey::import(format, &pair.public_key.export(format).unwrap()).unwrap();
        let private_key = RsaPrivateKey::import(format, &pair.private_key.export(format).unwrap()).unwrap();
        prop_assert_eq!(&public_key, &pair.public_key);
        prop_assert_eq!(&private_key, &pair.private_key);
        prop_assert_eq!(RsaKeyPair::import(format, &pair.export(format).unwrap()).unwrap(), pair);
    }

    #[test]
    fn certificate_export_roundtrip(pair in key_pair(), owner in ".*", format in any_format()) {
        let cert = Certificate::self_signed(&owner, &pair).unwrap();
        let imported = Certificate::import(format, &cert.export(format).unwrap()).unwrap();
        prop_assert!(imported.verify(&pair.public_key));
        prop_assert_eq!(imported, cert);
    }
}

proptest! {
    #[test]
    fn padding_roundtrip(msg in any::<Vec<u8>>(), min_len in 0usize..512, seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let padded = add_padding(&msg, min_len, &mut rng).unwrap();
        prop_assert!(padded.len() >= min_len);
        prop_assert_eq!(remove_padding(&padded).unwrap(), msg);
    }

    #[test]
    fn base64_roundtrip(data in any::<Vec<u8>>()) {
        prop_assert_eq!(base64::decode(&base64::encode(&data)).unwrap(), data);
    }

    #[test]
    fn structured_integers_are_exact(bytes in proptest::collection::vec(any::<u8>(), 1..96)) {
        let n = BigUint::from_bytes_be(&bytes);
        let key = RsaPublicKey::new(BigUint::from(65537u32), n);
        let imported = RsaPublicKey::import(Format::Structured, &key.export(Format::Structured).unwrap()).unwrap();
        prop_assert_eq!(imported, key);
    }
}
