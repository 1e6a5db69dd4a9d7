pub type OperationId = u32;

pub const DEFAULT_FIELD: &str = "Value";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDescriptor {
    pub id: OperationId,
    pub name: &'static str,
    pub supports_restore: bool,
    pub fields: &'static [&'static str],
}

impl OperationDescriptor {
    pub fn primary_field(&self) -> &'static str {
        self.fields.first().copied().unwrap_or(DEFAULT_FIELD)
    }
}

pub const CATALOG: &[OperationDescriptor] = &[
    OperationDescriptor {
        id: 1,
        name: "RestorePoint",
        supports_restore: false,
        fields: &[DEFAULT_FIELD],
    },
    OperationDescriptor {
        id: 2,
        name: "GameUninstall",
        supports_restore: false,
        fields: &[DEFAULT_FIELD],
    },
    OperationDescriptor {
        id: 3,
        name: "RegistryHWID",
        supports_restore: true,
        fields: &["MachineGuid", "HwProfileGuid"],
    },
    OperationDescriptor {
        id: 4,
        name: "VPN",
        supports_restore: false,
        fields: &[DEFAULT_FIELD],
    },
    OperationDescriptor {
        id: 5,
        name: "DiskIDs",
        supports_restore: true,
        fields: &[DEFAULT_FIELD],
    },
    OperationDescriptor {
        id: 6,
        name: "SMBIOS",
        supports_restore: true,
        fields: &[DEFAULT_FIELD],
    },
    OperationDescriptor {
        id: 7,
        name: "MACAddress",
        supports_restore: true,
        fields: &[DEFAULT_FIELD],
    },
    OperationDescriptor {
        id: 8,
        name: "MonitorHWID",
        supports_restore: true,
        fields: &[DEFAULT_FIELD],
    },
    OperationDescriptor {
        id: 9,
        name: "Peripherals",
        supports_restore: true,
        fields: &[DEFAULT_FIELD],
    },
    OperationDescriptor {
        id: 10,
        name: "Cleaner",
        supports_restore: false,
        fields: &[DEFAULT_FIELD],
    },
];

pub fn descriptor(id: OperationId) -> Option<&'static OperationDescriptor> {
    CATALOG.iter().find(|descriptor| descriptor.id == id)
}
