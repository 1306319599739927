//! In-memory archive builders for tests.

use byteorder::{LittleEndian, WriteBytesExt};

use super::V2_MAGIC;

pub(crate) enum Child {
    File(&'static str),
    Dir(&'static str),
    Anonymous,
}

pub(crate) struct Root {
    pub name: &'static str,
    pub children: &'static [Child],
}

pub(crate) fn write_name(out: &mut Vec<u8>, name: &[u8]) {
    out.write_u32::<LittleEndian>(name.len() as u32).unwrap();
    out.extend_from_slice(name);
}

/// Entry table plus packed content, with offsets assigned in order.
fn table(files: &[(&[u8], &[u8])], wide: bool) -> (Vec<u8>, Vec<u8>) {
    let mut table = Vec::new();
    let mut content = Vec::new();
    for (name, data) in files {
        write_name(&mut table, name);
        if wide {
            table.write_u64::<LittleEndian>(data.len() as u64).unwrap();
            table.write_u64::<LittleEndian>(content.len() as u64).unwrap();
        } else {
            table.write_u32::<LittleEndian>(data.len() as u32).unwrap();
            table.write_u32::<LittleEndian>(content.len() as u32).unwrap();
        }
        content.extend_from_slice(data);
    }
    (table, content)
}

pub(crate) fn v1(files: &[(&str, &[u8])]) -> Vec<u8> {
    let files: Vec<(&[u8], &[u8])> = files.iter().map(|(n, d)| (n.as_bytes(), *d)).collect();
    v1_raw(&files)
}

/// Like [`v1`], with names given as raw bytes.
pub(crate) fn v1_raw(files: &[(&[u8], &[u8])]) -> Vec<u8> {
    let (table, content) = table(files, false);
    let mut out = Vec::new();
    out.write_u32::<LittleEndian>(8 + table.len() as u32).unwrap();
    out.write_u32::<LittleEndian>(files.len() as u32).unwrap();
    out.extend_from_slice(&table);
    out.extend_from_slice(&content);
    out
}

pub(crate) fn v2(files: &[(&str, &[u8])], roots: &[Root]) -> Vec<u8> {
    let files: Vec<(&[u8], &[u8])> = files.iter().map(|(n, d)| (n.as_bytes(), *d)).collect();
    let (table, content) = table(&files, true);
    let mut out = V2_MAGIC.to_vec();
    out.write_u32::<LittleEndian>(1).unwrap();
    out.write_u64::<LittleEndian>(1).unwrap();
    out.write_u32::<LittleEndian>(files.len() as u32).unwrap();
    out.extend_from_slice(&table);

    out.write_u32::<LittleEndian>(roots.len() as u32).unwrap();
    for root in roots {
        write_name(&mut out, root.name.as_bytes());
        out.write_u32::<LittleEndian>(root.children.len() as u32).unwrap();
        for child in root.children {
            let (name, dir) = match child {
                Child::File(name) => (*name, 0),
                Child::Dir(name) => (*name, 1),
                Child::Anonymous => ("", 0),
            };
            write_name(&mut out, name.as_bytes());
            out.write_u8(dir).unwrap();
        }
    }

    out.extend_from_slice(&content);
    out
}
