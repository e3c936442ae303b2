use goblin::{mach::Mach, Object};

use crate::Result;

/// Platform of the host binary, which decides the alignment of assembly entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TargetInfo {
    /// Unknown platform, entries are not aligned
    #[default]
    Unknown,
    /// Any non-Windows, non-ARM64 platform
    Other,
    /// Windows on x86/x64
    Windows,
    /// Any ARM64 platform
    Arm64,
}

impl TargetInfo {
    /// Alignment of assembly entries inside the bundle.
    ///
    /// Assemblies are memory-mapped by the host straight out of the bundle, which requires
    /// page alignment on Windows and ARM64.
    #[must_use]
    pub const fn assembly_alignment(self) -> i64 {
        match self {
            TargetInfo::Windows | TargetInfo::Arm64 => 4096,
            TargetInfo::Other => 64,
            TargetInfo::Unknown => 1,
        }
    }

    /// The platform this crate was compiled for.
    #[must_use]
    pub const fn host() -> Self {
        if cfg!(target_arch = "aarch64") {
            TargetInfo::Arm64
        } else if cfg!(windows) {
            TargetInfo::Windows
        } else {
            TargetInfo::Other
        }
    }

    /// Inspects the header of a host binary.
    ///
    /// PE images map to [`TargetInfo::Windows`], ELF and Mach-O images to
    /// [`TargetInfo::Other`], unless their machine is ARM64. Anything else is
    /// [`TargetInfo::Unknown`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::GoblinErr`] if a recognised header is damaged.
    pub fn detect(data: &[u8]) -> Result<Self> {
        Ok(match Object::parse(data)? {
            Object::PE(pe) => {
                if pe.header.coff_header.machine == goblin::pe::header::COFF_MACHINE_ARM64 {
                    TargetInfo::Arm64
                } else {
                    TargetInfo::Windows
                }
            }
            Object::Elf(elf) => {
                if elf.header.e_machine == goblin::elf::header::EM_AARCH64 {
                    TargetInfo::Arm64
                } else {
                    TargetInfo::Other
                }
            }
            Object::Mach(Mach::Binary(macho)) => {
                if macho.header.cputype == goblin::mach::cputype::CPU_TYPE_ARM64 {
                    TargetInfo::Arm64
                } else {
                    TargetInfo::Other
                }
            }
            Object::Mach(Mach::Fat(_)) => TargetInfo::Other,
            _ => TargetInfo::Unknown,
        })
    }
}
