use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub instances_seen: u64,
    pub accuracy: f64,
    pub kappa: f64,
    pub seconds: f64,
    pub extras: BTreeMap<String, f64>,
}

impl Snapshot {
    #[inline]
    fn fmtv(v: f64) -> String {
        if v.is_nan() {
            "NaN".into()
        } else {
            format!("{:.6}", v)
        }
    }
}

impl Display for Snapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "seen={}, acc={}, kappa={}, t={:.6}s",
            self.instances_seen,
            Self::fmtv(self.accuracy),
            Self::fmtv(self.kappa),
            self.seconds
        )?;

        for (k, v) in self.extras.iter() {
            write!(f, ", {}={}", k, Self::fmtv(*v))?;
        }
        Ok(())
    }
}
