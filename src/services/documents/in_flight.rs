use dashmap::DashSet;

/// 正在保存中的身份证号集合，同一身份证号同时只允许一个保存操作
#[derive(Debug, Default)]
pub struct InFlightSaves {
    keys: DashSet<String>,
}

impl InFlightSaves {
    /// 占用 key；已被占用时返回 None
    pub fn try_acquire(&self, key: &str) -> Option<InFlightGuard<'_>> {
        if self.keys.insert(key.to_string()) {
            Some(InFlightGuard {
                owner: self,
                key: key.to_string(),
            })
        } else {
            None
        }
    }

    pub fn is_in_flight(&self, key: &str) -> bool {
        self.keys.contains(key)
    }
}

/// drop 时释放占用
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    owner: &'a InFlightSaves,
    key: String,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.owner.keys.remove(&self.key);
    }
}
