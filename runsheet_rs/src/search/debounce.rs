use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

enum Message<A> {
    Call(A),
    Cancel,
}

/// 呼び出しが `delay` のあいだ途切れたら、最後の引数でコールバックを 1 回だけ実行します。
/// 破棄すると待機中の呼び出しも取り消される。tokio ランタイム上で生成すること
pub struct Debouncer<A> {
    sender: mpsc::UnboundedSender<Message<A>>,
    task: JoinHandle<()>,
}

impl<A> Debouncer<A>
where
    A: Send + 'static,
{
    pub fn new<F, Fut>(delay: Duration, callback: F) -> Self
    where
        F: Fn(A) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (sender, mut receiver) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
            let sleep = tokio::time::sleep(delay);
            tokio::pin!(sleep);

            let mut pending: Option<A> = None;
            loop {
                // 締め切りと同時に届いた取り消しを先に処理する
                tokio::select! {
                    biased;

                    message = receiver.recv() => match message {
                        Some(Message::Call(args)) => {
                            pending = Some(args);
                            sleep.as_mut().reset(Instant::now() + delay);
                        }
                        Some(Message::Cancel) => pending = None,
                        None => break,
                    },
                    () = &mut sleep, if pending.is_some() => {
                        if let Some(args) = pending.take() {
                            // 実行中の検索は待たない。古い結果は受け取る側で捨てる
                            tokio::spawn(callback(args));
                        }
                    }
                }
            }
        });

        Self { sender, task }
    }

    pub fn call(&self, args: A) {
        if self.sender.send(Message::Call(args)).is_err() {
            log::warn!("debouncer task has already stopped");
        }
    }

    /// 待機中の呼び出しを取り消します。実行済みのコールバックは止めない
    pub fn cancel(&self) {
        // 送れないならそもそも待機中のものはない
        let _ = self.sender.send(Message::Cancel);
    }
}

impl<A> Drop for Debouncer<A> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
