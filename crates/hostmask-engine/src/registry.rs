use std::ffi::OsStr;
use std::os::windows::ffi::OsStrExt;

use anyhow::{anyhow, Result};
use windows::core::PCWSTR;
use windows::Win32::Foundation::{ERROR_FILE_NOT_FOUND, ERROR_SUCCESS};
use windows::Win32::System::Registry::{
    RegCloseKey, RegCreateKeyExW, RegOpenKeyExW, RegQueryValueExW, RegSetValueExW, HKEY,
    HKEY_LOCAL_MACHINE, KEY_READ, KEY_WRITE, REG_OPTION_NON_VOLATILE, REG_SZ, REG_VALUE_TYPE,
};

use crate::host::MachineIdentity;

pub struct RegistryIdentity;

const LOCATIONS: &[(&str, &str, &str)] = &[
    (
        "MachineGuid",
        r"SOFTWARE\Microsoft\Cryptography",
        "MachineGuid",
    ),
    (
        "HwProfileGuid",
        r"SYSTEM\CurrentControlSet\Control\IDConfigDB\Hardware Profiles\0001",
        "HwProfileGuid",
    ),
];

fn location(field: &str) -> Result<(&'static str, &'static str)> {
    LOCATIONS
        .iter()
        .find(|(name, _, _)| *name == field)
        .map(|(_, key, value)| (*key, *value))
        .ok_or_else(|| anyhow!("no registry location is mapped for field: {field}"))
}

fn wide(value: &str) -> Vec<u16> {
    OsStr::new(value)
        .encode_wide()
        .chain(std::iter::once(0))
        .collect()
}

impl MachineIdentity for RegistryIdentity {
    fn read(&self, field: &str) -> Result<Option<String>> {
        let (key_path, value_name) = location(field)?;
        let key_w = wide(key_path);
        let value_w = wide(value_name);

        unsafe {
            let mut hkey = HKEY::default();
            let opened = RegOpenKeyExW(
                HKEY_LOCAL_MACHINE,
                PCWSTR(key_w.as_ptr()),
                Some(0),
                KEY_READ,
                &mut hkey,
            );
            if opened == ERROR_FILE_NOT_FOUND {
                return Ok(None);
            }
            if opened != ERROR_SUCCESS {
                return Err(anyhow!(
                    "failed to open registry key {key_path}: {}",
                    opened.0
                ));
            }

            let mut value_type = REG_VALUE_TYPE::default();
            let mut buffer = [0u16; 1024];
            let mut size = (buffer.len() * 2) as u32;
            let queried = RegQueryValueExW(
                hkey,
                PCWSTR(value_w.as_ptr()),
                None,
                Some(&mut value_type),
                Some(buffer.as_mut_ptr() as *mut u8),
                Some(&mut size),
            );
            let _ = RegCloseKey(hkey);

            if queried == ERROR_FILE_NOT_FOUND {
                return Ok(None);
            }
            if queried != ERROR_SUCCESS {
                return Err(anyhow!(
                    "failed to read registry value {value_name}: {}",
                    queried.0
                ));
            }
            if value_type != REG_SZ {
                return Err(anyhow!("registry value {value_name} is not a string"));
            }

            let chars = (size as usize / 2).min(buffer.len());
            let text = String::from_utf16_lossy(&buffer[..chars])
                .trim_end_matches('\0')
                .to_string();
            Ok(Some(text))
        }
    }

    fn write(&self, field: &str, value: &str) -> Result<()> {
        let (key_path, value_name) = location(field)?;
        let key_w = wide(key_path);
        let value_w = wide(value_name);
        let data_w = wide(value);

        unsafe {
            let mut hkey = HKEY::default();
            let created = RegCreateKeyExW(
                HKEY_LOCAL_MACHINE,
                PCWSTR(key_w.as_ptr()),
                Some(0),
                None,
                REG_OPTION_NON_VOLATILE,
                KEY_WRITE,
                None,
                &mut hkey,
                None,
            );
            if created != ERROR_SUCCESS {
                return Err(anyhow!(
                    "failed to open registry key {key_path}: {}",
                    created.0
                ));
            }

            let bytes = &data_w.align_to::<u8>().1[..data_w.len() * 2];
            let written = RegSetValueExW(hkey, PCWSTR(value_w.as_ptr()), Some(0), REG_SZ, Some(bytes));
            let _ = RegCloseKey(hkey);

            if written != ERROR_SUCCESS {
                return Err(anyhow!(
                    "failed to write registry value {value_name}: {}",
                    written.0
                ));
            }
        }
        Ok(())
    }
}
