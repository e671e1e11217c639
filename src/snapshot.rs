//! Checksummed binary snapshots of a session.
//!
//! Layout:
//! - Version (4 bytes, LE)
//! - Data length (4 bytes, LE)
//! - bincode-serialized [`SessionSnapshot`]
//! - SHA256 over the three fields above (32 bytes)

use crate::character::types::Character;
use crate::core::constants::SNAPSHOT_VERSION;
use crate::dungeon::types::FloorMap;
use crate::error::SnapshotError;
use crate::items::drops::RarityExclusions;
use crate::items::equipment::Equipment;
use crate::items::types::Item;
use crate::session::Encounter;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

const HEADER_LEN: usize = 8;
const CHECKSUM_LEN: usize = 32;

/// Everything needed to resume a session. A pending counter-attack is not
/// carried over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub character: Character,
    pub floor_map: FloorMap,
    pub current_room_id: Uuid,
    pub encounter: Option<Encounter>,
    pub equipment: Equipment,
    pub bag: Vec<Item>,
    pub zone_heat: u32,
    pub excluded_rarities: RarityExclusions,
}

fn checksum(version: &[u8], length: &[u8], data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(version);
    hasher.update(length);
    hasher.update(data);
    hasher.finalize().into()
}

impl SessionSnapshot {
    pub fn encode(&self) -> Result<Vec<u8>, SnapshotError> {
        let data = bincode::serialize(self)?;
        let version = SNAPSHOT_VERSION.to_le_bytes();
        let length = (data.len() as u32).to_le_bytes();
        let sum = checksum(&version, &length, &data);

        let mut out = Vec::with_capacity(HEADER_LEN + data.len() + CHECKSUM_LEN);
        out.extend_from_slice(&version);
        out.extend_from_slice(&length);
        out.extend_from_slice(&data);
        out.extend_from_slice(&sum);
        Ok(out)
    }

    /// Verify version and checksum, then decode.
    pub fn decode(bytes: &[u8]) -> Result<Self, SnapshotError> {
        if bytes.len() < HEADER_LEN + CHECKSUM_LEN {
            return Err(SnapshotError::Truncated(bytes.len()));
        }
        let (version_bytes, rest) = bytes.split_at(4);
        let (length_bytes, rest) = rest.split_at(4);

        let mut version = [0u8; 4];
        version.copy_from_slice(version_bytes);
        let version = u32::from_le_bytes(version);
        if version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: version,
                expected: SNAPSHOT_VERSION,
            });
        }

        let mut length = [0u8; 4];
        length.copy_from_slice(length_bytes);
        let data_len = u32::from_le_bytes(length) as usize;
        if rest.len() != data_len + CHECKSUM_LEN {
            return Err(SnapshotError::Truncated(bytes.len()));
        }

        let (data, stored) = rest.split_at(data_len);
        if checksum(version_bytes, length_bytes, data) != stored {
            return Err(SnapshotError::ChecksumMismatch);
        }

        Ok(bincode::deserialize(data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::generation::generate_floor_map;
    use crate::items::generation::fallback_item;
    use crate::items::types::Rarity;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample() -> SessionSnapshot {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let floor_map = generate_floor_map(3, &mut rng);
        let mut equipment = Equipment::new();
        equipment.equip(fallback_item(2, &mut rand::thread_rng()));
        SessionSnapshot {
            character: Character::new("Saver"),
            current_room_id: floor_map.rooms[0].id,
            floor_map,
            encounter: None,
            equipment,
            bag: vec![fallback_item(3, &mut rand::thread_rng())],
            zone_heat: 12,
            excluded_rarities: [Rarity::Common].into_iter().collect(),
        }
    }

    #[test]
    fn test_encode_decode() {
        let snapshot = sample();
        let bytes = snapshot.encode().unwrap();
        assert_eq!(SessionSnapshot::decode(&bytes).unwrap(), snapshot);
    }

    #[test]
    fn test_corrupted_byte_fails_checksum() {
        let mut bytes = sample().encode().unwrap();
        let mid = bytes.len() / 2;
        bytes[mid] ^= 0xFF;
        assert!(matches!(
            SessionSnapshot::decode(&bytes),
            Err(SnapshotError::ChecksumMismatch)
        ));
    }

    #[test]
    fn test_wrong_version_rejected() {
        let mut bytes = sample().encode().unwrap();
        bytes[0] = bytes[0].wrapping_add(1);
        assert!(matches!(
            SessionSnapshot::decode(&bytes),
            Err(SnapshotError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn test_truncated_input() {
        assert!(matches!(
            SessionSnapshot::decode(&[0u8; 10]),
            Err(SnapshotError::Truncated(10))
        ));
        let bytes = sample().encode().unwrap();
        assert!(matches!(
            SessionSnapshot::decode(&bytes[..bytes.len() - 1]),
            Err(SnapshotError::Truncated(_))
        ));
    }
}
