//! Spawn-point file (`<zone>.sp`)
//!
//! Layout, all little-endian: the 4-byte magic `spt1`, then one record per
//! confirmed point until the end of the file:
//!
//! ```text
//! x i32, y i32, z i32, interval i64, count u32, first_seen i64,
//! name (u32 length + text), last (u32 length + text)
//! ```

use crate::error::{Result, SpawnError};
use crate::spawn_point::SpawnPoint;
use bytes::{BufMut, BytesMut};
use seq_core::SpatialKey;
use seq_protocol::text::put_prefixed_text;
use seq_protocol::NetStream;
use std::fs;
use std::path::Path;

pub const SPAWN_POINT_MAGIC: [u8; 4] = *b"spt1";

/// Write every point, replacing the file
pub fn save_spawn_points<'a, I>(path: &Path, points: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a SpawnPoint>,
{
    let mut buf = BytesMut::with_capacity(1024);
    buf.put_slice(&SPAWN_POINT_MAGIC);

    let mut written = 0;
    for sp in points {
        buf.put_i32_le(sp.key.x);
        buf.put_i32_le(sp.key.y);
        buf.put_i32_le(sp.key.z);
        buf.put_i64_le(sp.interval);
        buf.put_u32_le(sp.count);
        buf.put_i64_le(sp.first_seen);
        put_prefixed_text(&mut buf, &sp.name);
        put_prefixed_text(&mut buf, &sp.last);
        written += 1;
    }

    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    fs::write(path, &buf)?;
    Ok(written)
}

/// Read every point in a file
///
/// Loaded points have no live occupant and no recorded death.
pub fn load_spawn_points(path: &Path) -> Result<Vec<SpawnPoint>> {
    let data = fs::read(path)?;
    let mut s = NetStream::new(&data);

    let found: [u8; 4] = s.read_array()?;
    if found != SPAWN_POINT_MAGIC {
        return Err(SpawnError::BadMagic {
            path: path.to_path_buf(),
            found,
        });
    }

    let mut points = Vec::new();
    while !s.at_end() {
        let key = SpatialKey::new(s.read_i32()?, s.read_i32()?, s.read_i32()?);
        let interval = s.read_i64()?;
        let count = s.read_u32()?;
        let first_seen = s.read_i64()?;
        let name = s.read_prefixed_text()?;
        let last = s.read_prefixed_text()?;

        points.push(SpawnPoint {
            key,
            name,
            last,
            first_seen,
            spawn_time: first_seen,
            death_time: None,
            interval,
            count,
            last_id: None,
        });
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use seq_core::{Point3, SpawnId};

    #[test]
    fn test_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spawnpoints").join("qeynos.sp");

        let mut rat = SpawnPoint::new(SpawnId::new(1), Point3::new(100, 200, 5), "a_rat", 50);
        rat.name = "rat hill".into();
        rat.interval = 390;
        rat.count = 4;
        let bat = SpawnPoint::new(SpawnId::new(2), Point3::new(-1, -2, -3), "a_bat", 60);

        assert_eq!(save_spawn_points(&path, [&rat, &bat]).unwrap(), 2);
        let loaded = load_spawn_points(&path).unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].key, rat.key);
        assert_eq!(loaded[0].name, "rat hill");
        assert_eq!(loaded[0].last, "a_rat");
        assert_eq!(loaded[0].interval, 390);
        assert_eq!(loaded[0].count, 4);
        assert_eq!(loaded[0].first_seen, 50);
        assert_eq!(loaded[0].last_id, None);
        assert_eq!(loaded[1].key, SpatialKey::new(-1, -2, -3));
    }

    #[test]
    fn test_bad_magic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.sp");
        fs::write(&path, b"spt0").unwrap();

        assert!(matches!(
            load_spawn_points(&path),
            Err(SpawnError::BadMagic { .. })
        ));
    }

    #[test]
    fn test_truncated_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.sp");
        fs::write(&path, b"spt1\x01\x00\x00\x00").unwrap();

        assert!(matches!(
            load_spawn_points(&path),
            Err(SpawnError::Decode(_))
        ));
    }
}
