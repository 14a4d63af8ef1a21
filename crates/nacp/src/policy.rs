//! NACP policy enums
//!
//! Each enum decodes one raw scalar field of the control descriptor. Raw
//! values outside the known range decode to `None`; `as_str` mirrors the
//! names the authoring tools use.

macro_rules! policy_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident = $value:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[repr(u8)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $value,)+
        }

        impl $name {
            /// Decode a raw field value; unknown values yield `None`.
            pub fn from_raw(raw: u8) -> Option<Self> {
                match raw {
                    $($value => Some(Self::$variant),)+
                    _ => None,
                }
            }

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

policy_enum! {
    /// Whether launching requires an open user account.
    StartupUserAccount {
        None = 0,
        Required = 1,
        RequiredWithNetworkServiceAccountAvailable = 2,
    }
}

policy_enum! {
    UserAccountSwitchLock {
        Disable = 0,
        Enable = 1,
    }
}

policy_enum! {
    AddOnContentRegistrationType {
        AllOnLaunch = 0,
        OnDemand = 1,
    }
}

policy_enum! {
    Screenshot {
        Allow = 0,
        Deny = 1,
    }
}

policy_enum! {
    VideoCapture {
        Disable = 0,
        Manual = 1,
        Enable = 2,
    }
}

policy_enum! {
    DataLossConfirmation {
        None = 0,
        Required = 1,
    }
}

policy_enum! {
    PlayLogPolicy {
        Open = 0,
        LogOnly = 1,
        None = 2,
        Closed = 3,
    }
}

policy_enum! {
    LogoType {
        LicensedByNintendo = 0,
        /// Removed from current authoring tools but present in old titles.
        DistributedByNintendo = 1,
        Nintendo = 2,
    }
}

policy_enum! {
    LogoHandling {
        Auto = 0,
        Manual = 1,
    }
}

policy_enum! {
    RuntimeAddOnContentInstall {
        Deny = 0,
        AllowAppend = 1,
        AllowAppendButDontDownloadWhenUsingNetwork = 2,
    }
}

policy_enum! {
    RuntimeParameterDelivery {
        Always = 0,
        AlwaysIfUserStateMatched = 1,
        OnRestart = 2,
    }
}

policy_enum! {
    CrashReport {
        Deny = 0,
        Allow = 1,
    }
}

policy_enum! {
    Hdcp {
        None = 0,
        Required = 1,
    }
}

policy_enum! {
    PlayLogQueryCapability {
        None = 0,
        WhiteList = 1,
        All = 2,
    }
}

policy_enum! {
    PlayReportPermission {
        None = 0,
        TargetMarketing = 1,
    }
}
